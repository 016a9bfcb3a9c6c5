use serde_json::Value;

/// GitHub endpoint describing the latest published release.
pub const LATEST_RELEASE_URL: &str = "https://api.github.com/repos/abdfnx/resto/releases/latest";

/// Shown by the "How to Update ?" option of the update modal.
pub const UPDATE_INSTRUCTIONS: &str = "\
How to update resto?

First quit resto, then:

1. if you installed it from the install script, run the script again
2. if you installed it with homebrew, run 'brew upgrade resto'
3. if you built it from source, pull the latest sources and rebuild
";

/// Outcome of comparing the running version against the latest release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate { version: String },
    Available { current: String, latest: String },
}

impl UpdateStatus {
    /// Any difference between the two versions counts as an update.
    pub fn compare(current: &str, latest: &str) -> Self {
        let current = normalize(current);
        let latest = normalize(latest);
        if current == latest {
            UpdateStatus::UpToDate { version: current }
        } else {
            UpdateStatus::Available { current, latest }
        }
    }

    pub fn message(&self) -> String {
        match self {
            UpdateStatus::UpToDate { version } => {
                format!("All good, you're using the latest version of resto ({version})")
            }
            UpdateStatus::Available { current, latest } => {
                format!("There's a new version of resto available: {current} → {latest}")
            }
        }
    }
}

/// Pull the release tag out of a GitHub release document.
pub fn parse_latest_tag(doc: &Value) -> Option<String> {
    doc.get("tag_name")
        .and_then(Value::as_str)
        .map(normalize)
        .filter(|tag| !tag.is_empty())
}

fn normalize(version: &str) -> String {
    version.trim().trim_start_matches('v').to_string()
}
