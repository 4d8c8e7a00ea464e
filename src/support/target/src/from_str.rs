use super::MachineProfile;
use std::{fmt::Display, str::FromStr};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownProfile(pub String);

impl Display for UnknownProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown machine profile '{}', expected one of lp64, llp64, ilp32, i386",
            self.0
        )
    }
}

impl std::error::Error for UnknownProfile {}

impl FromStr for MachineProfile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        Self::PRESETS
            .into_iter()
            .find(|profile| profile.name == name)
            .or_else(|| match name.as_str() {
                "x86_64" | "amd64" => Some(Self::LP64),
                "win64" => Some(Self::LLP64),
                "x86" | "i686" => Some(Self::I386_SYSV),
                _ => None,
            })
            .ok_or_else(|| UnknownProfile(s.to_string()))
    }
}
