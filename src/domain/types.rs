use std::fmt;

use serde::{Deserialize, Serialize};

pub type WindowId = i64;
pub type TabId = i64;

/// Identity and geometry of the window the FTE prompt was opened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub id: WindowId,
    pub height: u32,
    pub width: u32,
    pub left: i32,
    pub top: i32,
}

/// Tab of the settings window opened by the handoff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsWindowRecord {
    pub id: TabId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    Popup,
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowType::Popup => write!(f, "popup"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWindowOptions {
    pub height: u32,
    pub width: u32,
    pub left: i32,
    pub top: i32,
    pub focused: bool,
    #[serde(rename = "type")]
    pub window_type: WindowType,
    pub url: String,
}

impl CreateWindowOptions {
    /// A focused popup occupying the same screen area as `descriptor`.
    pub fn popup_at(descriptor: &WindowDescriptor, url: &str) -> Self {
        Self {
            height: descriptor.height,
            width: descriptor.width,
            left: descriptor.left,
            top: descriptor.top,
            focused: true,
            window_type: WindowType::Popup,
            url: url.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabHandle {
    pub id: TabId,
}

/// What the host reports back for a created window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowHandle {
    pub id: WindowId,
    pub tabs: Vec<TabHandle>,
}

impl WindowHandle {
    pub fn primary_tab(&self) -> Option<TabId> {
        self.tabs.first().map(|t| t.id)
    }
}

/// Document loading phase, as reported by the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}
