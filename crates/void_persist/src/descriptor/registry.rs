use serde::{Deserialize, Serialize};

use super::{Descriptor, Timestamp};

/// Global registry record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDescriptor {
    #[serde(default)]
    pub projects: Vec<ProjectRefDescriptor>,
    #[serde(default)]
    pub last_project: Option<ProjectRefDescriptor>,
    #[serde(default)]
    pub settings: SettingsDescriptor,
}

impl Descriptor for RegistryDescriptor {
    const NAME: &'static str = "registry";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectRefDescriptor {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub last_opened: Option<Timestamp>,
}

impl Descriptor for ProjectRefDescriptor {
    const NAME: &'static str = "project-reference";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDescriptor {
    #[serde(default)]
    pub keyboard_layout: KeyboardLayoutDescriptor,
}

impl Descriptor for SettingsDescriptor {
    const NAME: &'static str = "settings";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardLayoutDescriptor {
    #[default]
    Qwerty,
    Qwertz,
    Azerty,
}

impl Descriptor for KeyboardLayoutDescriptor {
    const NAME: &'static str = "keyboard-layout";
}
