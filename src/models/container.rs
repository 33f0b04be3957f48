use std::fmt;

use serde::Deserialize;

/// Status of a container as reported by the status service
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Created,
    Restarting,
    Removing,
    Dead,
    /// Anything the service reports that we don't know about
    Other(String),
    #[default]
    Unknown,
}

impl ContainerStatus {
    /// Parse the free-text status field. Services sometimes send docker's
    /// long form ("Up 3 hours", "Exited (0) 2 minutes ago"), so only the
    /// leading word is matched.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unknown;
        }
        let word = trimmed
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match word.as_str() {
            "running" | "up" => Self::Running,
            "exited" => Self::Exited,
            "paused" => Self::Paused,
            "created" => Self::Created,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "dead" => Self::Dead,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Client-side mapping used when the service sends no color hint
    pub fn indicator(&self) -> StatusIndicator {
        match self {
            Self::Running => StatusIndicator::Ok,
            Self::Paused | Self::Restarting | Self::Created => StatusIndicator::Warn,
            Self::Unknown => StatusIndicator::Unknown,
            _ => StatusIndicator::Alert,
        }
    }
}

/// Visual state of a row's status dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Ok,
    Warn,
    Alert,
    Unknown,
}

impl StatusIndicator {
    /// Interpret a server color hint such as `bg-green-500`
    pub fn from_hint(hint: &str) -> Option<Self> {
        let hint = hint.to_lowercase();
        if hint.contains("green") {
            Some(Self::Ok)
        } else if hint.contains("yellow") || hint.contains("orange") || hint.contains("amber") {
            Some(Self::Warn)
        } else if hint.contains("red") {
            Some(Self::Alert)
        } else {
            None
        }
    }
}

/// A loosely typed display field: the service may send strings, numbers or lists
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Text(String),
    Number(f64),
    List(Vec<DisplayValue>),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            DisplayValue::Number(n) => write!(f, "{:.1}", n),
            DisplayValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

/// One row's worth of container metadata for a poll cycle
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContainerRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_color: Option<String>,
    #[serde(default)]
    pub ports: Option<DisplayValue>,
    #[serde(default)]
    pub cpu: Option<DisplayValue>,
    #[serde(default)]
    pub mem: Option<DisplayValue>,
}

impl ContainerRecord {
    pub fn new(id: &str, name: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            image: String::new(),
            status: status.to_string(),
            status_color: None,
            ports: None,
            cpu: None,
            mem: None,
        }
    }

    pub fn parsed_status(&self) -> ContainerStatus {
        ContainerStatus::parse(&self.status)
    }

    /// Server hint wins; otherwise fall back to the status enumeration
    pub fn indicator(&self) -> StatusIndicator {
        self.status_color
            .as_deref()
            .and_then(StatusIndicator::from_hint)
            .unwrap_or_else(|| self.parsed_status().indicator())
    }

    /// Name used in titles; unnamed containers show their short id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id
                .char_indices()
                .nth(12)
                .map_or(self.id.as_str(), |(end, _)| &self.id[..end])
        } else {
            &self.name
        }
    }

    pub fn ports_display(&self) -> String {
        display_or_dash(self.ports.as_ref())
    }

    pub fn cpu_display(&self) -> String {
        display_or_dash(self.cpu.as_ref())
    }

    pub fn mem_display(&self) -> String {
        display_or_dash(self.mem.as_ref())
    }
}

fn display_or_dash(value: Option<&DisplayValue>) -> String {
    match value.map(|v| v.to_string()) {
        Some(s) if !s.trim().is_empty() => s,
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_long_form() {
        assert_eq!(ContainerStatus::parse("running"), ContainerStatus::Running);
        assert_eq!(ContainerStatus::parse("Up 3 hours"), ContainerStatus::Running);
        assert_eq!(
            ContainerStatus::parse("Exited (0) 2 minutes ago"),
            ContainerStatus::Exited
        );
        assert_eq!(ContainerStatus::parse(""), ContainerStatus::Unknown);
        assert_eq!(
            ContainerStatus::parse("degraded"),
            ContainerStatus::Other("degraded".to_string())
        );
    }

    #[test]
    fn test_indicator_prefers_server_hint() {
        let mut record = ContainerRecord::new("abc", "web", "exited");
        assert_eq!(record.indicator(), StatusIndicator::Alert);

        record.status_color = Some("bg-green-500".to_string());
        assert_eq!(record.indicator(), StatusIndicator::Ok);

        // Unrecognised hints are ignored
        record.status_color = Some("bg-gray-500".to_string());
        assert_eq!(record.indicator(), StatusIndicator::Alert);
    }

    #[test]
    fn test_running_is_ok_anything_else_alerts() {
        assert_eq!(ContainerRecord::new("a", "a", "running").indicator(), StatusIndicator::Ok);
        assert_eq!(ContainerRecord::new("a", "a", "dead").indicator(), StatusIndicator::Alert);
        assert_eq!(ContainerRecord::new("a", "a", "weird").indicator(), StatusIndicator::Alert);
    }

    #[test]
    fn test_record_accepts_mixed_display_fields() {
        let json = r#"{
            "id": "abc123",
            "name": "web",
            "image": "nginx:latest",
            "status": "running",
            "ports": ["80/tcp", "443/tcp"],
            "cpu": 12.5,
            "mem": "64MiB"
        }"#;
        let record: ContainerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.ports_display(), "80/tcp, 443/tcp");
        assert_eq!(record.cpu_display(), "12.5");
        assert_eq!(record.mem_display(), "64MiB");
    }

    #[test]
    fn test_missing_fields_render_as_dash() {
        let record: ContainerRecord = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(record.ports_display(), "-");
        assert_eq!(record.display_name(), "abc");
    }

    #[test]
    fn test_unnamed_record_shows_short_id() {
        let record = ContainerRecord::new("0123456789abcdef", "", "running");
        assert_eq!(record.display_name(), "0123456789ab");

        let record = ContainerRecord::new("aéééééééééééééé", "", "running");
        assert_eq!(record.display_name(), "aééééééééééé");
    }
}
