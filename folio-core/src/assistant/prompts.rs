//! System instruction for the assistant
//!
//! Built from the site profile and the curated catalog so the model can
//! answer questions about the owner's work without a retrieval step.

use crate::profile::Profile;
use crate::project::Project;

/// Name the assistant introduces itself with
pub const ASSISTANT_NAME: &str = "GraphicVortex";

/// Render the system instruction for `profile` and `projects`
pub fn system_instruction(profile: &Profile, projects: &[Project]) -> String {
    let name = &profile.name;
    let portfolio = projects
        .iter()
        .map(|p| format!("{} ({})", p.title, p.category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are "{ASSISTANT_NAME}", an AI assistant for {name}'s portfolio website.
Your goal is to answer visitor questions about {name}'s work, skills, and availability effectively and professionally.

Context about {name}:
- About: {about}
- Skills: {skills}
- Portfolio Projects: {portfolio}

Guidelines:
- Be polite, professional, yet creative.
- If asked about a specific project mentioned in the context, provide details.
- If asked about contact info, suggest they use the contact form below.
- Keep responses concise (under 100 words) unless asked for a detailed explanation.
- If the user asks about design services not listed, say {name} is open to discussing custom projects."#,
        about = profile.about,
        skills = profile.skills.join(", "),
    )
}
