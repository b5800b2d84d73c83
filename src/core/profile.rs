use crate::{error::FolioError, types::Profile};

const EMBEDDED_PROFILE: &str = include_str!("../../data/profile.json");

pub fn embedded() -> Result<Profile, FolioError> {
    let profile = serde_json::from_str::<Profile>(EMBEDDED_PROFILE)?;
    if let Some(skill) = profile.skills.iter().find(|skill| skill.level > 100) {
        return Err(FolioError::InvalidContent(format!(
            "skill \"{}\" has level {} above 100",
            skill.name, skill.level
        )));
    }
    Ok(profile)
}
