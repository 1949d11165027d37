use std::{fmt, str::FromStr, sync::Arc};

use thiserror::Error;

// ─── BusAddress ─────────────────────────────────────────────────────────────

/// A D-Bus server address such as `unix:path=/run/user/1000/at-spi/bus_0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusAddress(Arc<str>);

impl BusAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusAddressParseError {
    #[error("bus address cannot be empty")]
    Empty,
    #[error("bus address '{0}' has no transport prefix")]
    MissingTransport(String),
}

impl FromStr for BusAddress {
    type Err = BusAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            _ if s.is_empty() => Err(BusAddressParseError::Empty),
            Some((transport, _)) if !transport.is_empty() => Ok(Self(s.into())),
            _ => Err(BusAddressParseError::MissingTransport(s.to_string())),
        }
    }
}

// ─── ApplicationRef ─────────────────────────────────────────────────────────

/// One child of the registry's root accessible: the unique bus name of the
/// application plus the object path of its own root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationRef {
    pub bus_name: String,
    pub path: String,
}

impl ApplicationRef {
    pub fn new(bus_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            bus_name: bus_name.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ApplicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bus_name, self.path)
    }
}

// ─── ApplicationList ────────────────────────────────────────────────────────

/// Ordered children of the root accessible, as returned by the registry.
///
/// `Display` renders the sequence as a bracketed list of quoted identifiers,
/// e.g. `[':1.5:/org/a11y/atspi/accessible/root']`. Identifiers are
/// single-quoted unless they contain a `'` and no `"`, in which case double
/// quotes are used; backslashes and the chosen quote are escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationList(Vec<ApplicationRef>);

impl ApplicationList {
    pub fn new(apps: Vec<ApplicationRef>) -> Self {
        Self(apps)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicationRef> {
        self.0.iter()
    }

    pub fn summary(&self) -> String {
        format!("{} applications found", self.len())
    }
}

impl From<Vec<ApplicationRef>> for ApplicationList {
    fn from(apps: Vec<ApplicationRef>) -> Self {
        Self(apps)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = match s.contains('\'') && !s.contains('"') {
        true => '"',
        false => '\'',
    };
    write!(f, "{quote}")?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

impl fmt::Display for ApplicationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, app) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, &app.to_string())?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::arb_application_list;

    #[test]
    fn parses_unix_address() {
        let addr: BusAddress = "unix:path=/run/user/1000/at-spi/bus_0"
            .parse()
            .expect("valid unix address");
        assert_eq!(addr.as_str(), "unix:path=/run/user/1000/at-spi/bus_0");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let addr: BusAddress = "  unix:abstract=/tmp/dbus-x \n"
            .parse()
            .expect("address with whitespace");
        assert_eq!(addr.to_string(), "unix:abstract=/tmp/dbus-x");
    }

    #[test]
    fn rejects_empty_address() {
        assert_eq!("".parse::<BusAddress>(), Err(BusAddressParseError::Empty));
        assert_eq!("   ".parse::<BusAddress>(), Err(BusAddressParseError::Empty));
    }

    #[test]
    fn rejects_address_without_transport() {
        assert!(matches!(
            "path=/tmp/bus".parse::<BusAddress>(),
            Err(BusAddressParseError::MissingTransport(_))
        ));
        assert!(matches!(
            ":path=/tmp/bus".parse::<BusAddress>(),
            Err(BusAddressParseError::MissingTransport(_))
        ));
    }

    #[test]
    fn two_applications_render_as_quoted_list() {
        let list = ApplicationList::new(vec![
            ApplicationRef::new("app", "1"),
            ApplicationRef::new("app", "2"),
        ]);
        assert_eq!(list.summary(), "2 applications found");
        assert_eq!(list.to_string(), "['app:1', 'app:2']");
    }

    #[test]
    fn empty_list_renders_as_brackets() {
        let list = ApplicationList::default();
        assert_eq!(list.summary(), "0 applications found");
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn single_quote_switches_to_double_quotes() {
        let list = ApplicationList::new(vec![ApplicationRef::new("it's", "a\\b")]);
        assert_eq!(list.to_string(), r#"["it's:a\\b"]"#);
    }

    #[test]
    fn both_quote_kinds_escape_the_single_quote() {
        let list = ApplicationList::new(vec![ApplicationRef::new(r#"it's "x""#, "/p")]);
        assert_eq!(list.to_string(), r#"['it\'s "x":/p']"#);
    }

    #[test]
    fn double_quote_alone_stays_single_quoted() {
        let list = ApplicationList::new(vec![ApplicationRef::new(r#"say "hi""#, "/p")]);
        assert_eq!(list.to_string(), r#"['say "hi":/p']"#);
    }

    proptest! {
        #[test]
        fn summary_count_matches_rendered_items(list in arb_application_list()) {
            let rendered = list.to_string();
            prop_assert!(rendered.starts_with('[') && rendered.ends_with(']'));

            let expected = format!("{} applications found", list.len());
            prop_assert_eq!(list.summary(), expected);

            // Generated identifiers contain no quotes, so each item contributes two.
            let quotes = rendered.matches('\'').count();
            prop_assert_eq!(quotes, list.len() * 2);
        }
    }
}
