//! Portfolio owner profile: the facts the assistant is allowed to talk about.
//!
//! Every text the canned resolver returns, the system preamble sent to a
//! remote model, and the conversation starters are derived from a
//! [`Profile`]. Fields can be overridden from the `[profile]` table of the
//! configuration file; anything omitted keeps its default.

use serde::{Deserialize, Serialize};

/// A predefined question bound to a starter button or `/N` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStarter {
    pub label: String,
    pub question: String,
}

impl ConversationStarter {
    pub fn new(label: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            question: question.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub linkedin: String,
    pub projects: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub greeting: String,
    pub system_preamble: String,
    pub starters: Vec<ConversationStarter>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Abhishek".into(),
            email: "adabhishekdabas@gmail.com".into(),
            linkedin: "linkedin.com/in/adabhishek/".into(),
            projects: "Abhishek has worked on several projects including an LLM Agent Evaluation \
                Framework, Agentic RAG Systems using LlamaIndex and Claude 3.5, and Sophisticated \
                Agent Memory Systems that enhanced performance by 30% on document analysis tasks."
                .into(),
            skills: "Abhishek's core skills include Python, Experimental Design, and Risk \
                Modeling. He's proficient with AI systems like Claude 3.0/3.5 and Llama 3, as well \
                as ML infrastructure tools like AWS, PyTorch, TensorFlow, and LlamaIndex."
                .into(),
            experience: "Abhishek has 4+ years of experience in leading experimental research on \
                LLMs and agent systems. He previously worked as a Machine Learning Engineer at \
                Intellica.ai where he built real-time conversational AI systems and improved \
                speech-to-text pipelines for Indian English accents."
                .into(),
            education: "Abhishek holds a Master of Science in Information Systems from \
                Northeastern University, completed in December 2021. His coursework included \
                Artificial Intelligence, Data Science Engineering, Reinforcement Learning, and NLP."
                .into(),
            greeting: "I'm Abhishek's AI assistant. He specializes in LLM and agent systems \
                evaluation with expertise in designing comprehensive testing methodologies for \
                autonomous systems. Is there anything specific about his work, skills, or \
                experience you'd like to know?"
                .into(),
            system_preamble: DEFAULT_SYSTEM_PREAMBLE.into(),
            starters: vec![
                ConversationStarter::new("Projects", "What projects have you worked on?"),
                ConversationStarter::new("Skills", "What are your technical skills?"),
                ConversationStarter::new("Experience", "Tell me about your work experience"),
                ConversationStarter::new("Contact", "How can I contact you?"),
            ],
        }
    }
}

impl Profile {
    /// Reply for contact questions; always quotes the email and LinkedIn URL.
    pub fn contact(&self) -> String {
        format!(
            "You can contact {} via email at {} or connect with him on LinkedIn at {}",
            self.name, self.email, self.linkedin
        )
    }
}

const DEFAULT_SYSTEM_PREAMBLE: &str = "You are an AI assistant for Abhishek Dabas, a Research \
Scientist specializing in LLM and agent systems evaluation.

Key information about Abhishek:
- Background: 4+ years experience in leading experimental research on LLMs and agent systems
- Education: Master of Science in Information Systems from Northeastern University (Completed Dec 2021)
- Current role: Research Scientist working on autonomy evaluation and AI safety
- Skills: Python (Advanced), Experimental Design, Risk Modeling, Hypothesis Testing, Claude 3.0/3.5, \
Llama 3, Agent Evaluation, AWS, PyTorch, TensorFlow, Kubernetes, LlamaIndex
- Projects: LLM Agent Evaluation Framework, Agentic RAG Systems, Sophisticated Agent Memory Systems, \
Agent Benchmarking Framework
- Previous Experience: Machine Learning Engineer at Intellica.ai, conversational AI systems and \
speech-to-text pipelines

Keep responses concise, professional and helpful. Direct users to relevant sections of the \
portfolio when appropriate.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_quotes_configured_addresses() {
        let profile = Profile {
            email: "me@example.com".into(),
            linkedin: "linkedin.com/in/me/".into(),
            ..Profile::default()
        };
        let text = profile.contact();
        assert!(text.contains("me@example.com"));
        assert!(text.contains("linkedin.com/in/me/"));
    }

    #[test]
    fn default_texts_keep_the_owner_wording() {
        let profile = Profile::default();
        assert_eq!(
            profile.contact(),
            "You can contact Abhishek via email at adabhishekdabas@gmail.com or connect with him \
             on LinkedIn at linkedin.com/in/adabhishek/"
        );
        assert_eq!(
            profile.skills,
            "Abhishek's core skills include Python, Experimental Design, and Risk Modeling. \
             He's proficient with AI systems like Claude 3.0/3.5 and Llama 3, as well as ML \
             infrastructure tools like AWS, PyTorch, TensorFlow, and LlamaIndex."
        );
        assert!(profile.greeting.ends_with(
            "Is there anything specific about his work, skills, or experience you'd like to know?"
        ));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let profile: Profile = toml::from_str(r#"email = "x@y.z""#).unwrap();
        assert_eq!(profile.email, "x@y.z");
        assert_eq!(profile.starters.len(), 4);
        assert_eq!(profile.name, Profile::default().name);
    }
}
