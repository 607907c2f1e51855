//! Keyword dispatcher returning pre-authored replies.

use async_trait::async_trait;

use crate::error::ChatError;
use crate::profile::Profile;
use crate::types::Turn;

use super::ResponseResolver;

/// Reply returned when any of `keywords` occurs in the lower-cased message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    keywords: Vec<String>,
    response: String,
}

impl KeywordRule {
    /// Keywords are lower-cased so matching is case-insensitive.
    pub fn new<I, S>(keywords: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    /// `normalized` must already be lower-cased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Ordered keyword rules with a fallback. The first matching rule wins.
#[derive(Debug, Clone)]
pub struct CannedResolver {
    rules: Vec<KeywordRule>,
    default_response: String,
}

impl CannedResolver {
    pub fn new(rules: Vec<KeywordRule>, default_response: impl Into<String>) -> Self {
        Self {
            rules,
            default_response: default_response.into(),
        }
    }

    /// Standard rule set, in priority order: projects, skills, contact,
    /// experience, education.
    ///
    /// Contact also answers "reach you"/"reach out"/"get in touch"; a bare
    /// "reach" would swallow "research".
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(
            vec![
                KeywordRule::new(["project"], profile.projects.clone()),
                KeywordRule::new(["skill", "tech"], profile.skills.clone()),
                KeywordRule::new(
                    ["contact", "email", "reach you", "reach out", "get in touch"],
                    profile.contact(),
                ),
                KeywordRule::new(["experience", "work"], profile.experience.clone()),
                KeywordRule::new(["education", "degree"], profile.education.clone()),
            ],
            profile.greeting.clone(),
        )
    }

    /// Pure dispatch: reply text for `message`.
    pub fn reply_for(&self, message: &str) -> &str {
        let normalized = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(KeywordRule::response)
            .unwrap_or(self.default_response.as_str())
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }
}

#[async_trait]
impl ResponseResolver for CannedResolver {
    fn name(&self) -> &str {
        "canned"
    }

    async fn resolve(&self, message: &str, _history: &[Turn]) -> Result<String, ChatError> {
        Ok(self.reply_for(message).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> (Profile, CannedResolver) {
        let profile = Profile::default();
        let resolver = CannedResolver::from_profile(&profile);
        (profile, resolver)
    }

    #[test]
    fn project_matches_anywhere_in_any_case() {
        let (profile, resolver) = resolver();
        for message in ["project", "PROJECTS please", "your side-Project?", "myprojectlist"] {
            assert_eq!(resolver.reply_for(message), profile.projects, "{message}");
        }
    }

    #[test]
    fn each_group_has_its_reply() {
        let (profile, resolver) = resolver();
        assert_eq!(resolver.reply_for("Which technologies?"), profile.skills);
        assert_eq!(resolver.reply_for("your SKILLS"), profile.skills);
        assert_eq!(resolver.reply_for("email address?"), profile.contact());
        assert_eq!(resolver.reply_for("Past work"), profile.experience);
        assert_eq!(resolver.reply_for("What degree?"), profile.education);
        assert_eq!(resolver.reply_for("education history"), profile.education);
        assert_eq!(resolver.reply_for("How can I reach you?"), profile.contact());
        assert_eq!(resolver.reply_for("Tell me about your research"), profile.greeting);
    }

    #[test]
    fn unmatched_message_gets_default() {
        let (profile, resolver) = resolver();
        assert_eq!(resolver.reply_for("Hello there!"), profile.greeting);
        assert_eq!(resolver.reply_for(""), profile.greeting);
    }

    #[test]
    fn first_rule_wins_on_overlap() {
        let (profile, resolver) = resolver();
        assert_eq!(
            resolver.reply_for("Contact me about the project"),
            profile.projects
        );
        // skills precede contact
        assert_eq!(resolver.reply_for("email your tech stack"), profile.skills);
        // contact precedes experience
        assert_eq!(resolver.reply_for("work email"), profile.contact());
        assert_eq!(resolver.reply_for("Can I reach out about work?"), profile.contact());
        assert_eq!(resolver.reply_for("let's get in touch"), profile.contact());
    }

    #[test]
    fn custom_rules_are_lowercased() {
        let resolver = CannedResolver::new(vec![KeywordRule::new(["Rust"], "crab")], "none");
        assert_eq!(resolver.rules()[0].keywords(), ["rust".to_string()]);
        assert_eq!(resolver.reply_for("I like RUST"), "crab");
        assert_eq!(resolver.reply_for("go"), "none");
    }

    #[tokio::test]
    async fn resolve_never_fails() {
        let (profile, resolver) = resolver();
        let reply = resolver.resolve("How can I reach you by email?", &[]).await.unwrap();
        assert_eq!(reply, profile.contact());
    }
}
