//! Debian-style `/etc/network/interfaces` rewriting
//!
//! The file is treated as a list of blank-line separated stanzas. Setting an
//! interface drops every stanza that mentions it and appends a fresh one.
//! Networking is not reloaded afterwards.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{NetifError, NetifResult};
use crate::types::InterfaceDescription;

const STANZA_SEPARATOR: &str = "\n\n";
const INDENT: &str = "    ";

/// Stanza text for one interface, without a trailing newline
pub fn render_stanza(name: &str, desc: &InterfaceDescription) -> String {
    if desc.dhcp {
        return format!("auto {name}\niface {name} inet dhcp");
    }

    let mut stanza = format!("auto {name}\niface {name} inet static");
    for (key, value) in [
        ("address", &desc.ip),
        ("netmask", &desc.netmask),
        ("gateway", &desc.gateway),
    ] {
        if let Some(value) = value {
            stanza.push_str(&format!("\n{INDENT}{key} {value}"));
        }
    }
    stanza
}

/// Drop every stanza that names `name` as a whole token
pub fn exclude_interface(name: &str, content: &str) -> String {
    content
        .split(STANZA_SEPARATOR)
        .filter(|stanza| !stanza.split_whitespace().any(|token| token == name))
        .collect::<Vec<_>>()
        .join(STANZA_SEPARATOR)
        .trim()
        .to_string()
}

/// `content` with the stanza for `name` replaced by one built from `desc`
pub fn replace_interface(name: &str, content: &str, desc: &InterfaceDescription) -> String {
    let kept = exclude_interface(name, content);
    let stanza = render_stanza(name, desc);
    if kept.is_empty() {
        format!("{stanza}\n")
    } else {
        format!("{kept}{STANZA_SEPARATOR}{stanza}\n")
    }
}

/// The interfaces file on disk
#[derive(Debug, Clone)]
pub struct InterfacesFile {
    path: PathBuf,
}

impl InterfacesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current content; a missing file reads as empty
    pub async fn read(&self) -> NetifResult<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub async fn write(&self, content: &str) -> NetifResult<()> {
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Rewrite the stanza for `name`
    #[instrument(skip(self, desc), fields(path = %self.path.display()))]
    pub async fn apply(&self, name: &str, desc: &InterfaceDescription) -> NetifResult<()> {
        let current = self.read().await?;
        let updated = replace_interface(name, &current, desc);
        self.write(&updated).await?;
        debug!(dhcp = desc.dhcp, "rewrote interfaces stanza");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> NetifError {
        NetifError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
