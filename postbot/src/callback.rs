//! Callback payloads carried by inline-keyboard buttons.
//!
//! Payloads are the only state a button press delivers, so they encode the
//! whole action: `open:<file>` and `edit:<field>` carry an argument, the rest
//! are bare verbs. Unknown payloads decode to `None` and get guidance text.

use session_store::Field;

const OPEN_PREFIX: &str = "open:";
const EDIT_PREFIX: &str = "edit:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    /// Open a post from the chooser.
    Open(String),
    /// Arm a field for editing.
    Edit(Field),
    /// Commit the edited post.
    Commit,
    /// Create the collected post.
    Create,
    /// Discard the session.
    Cancel,
}

impl CallbackAction {
    pub fn parse(payload: &str) -> Option<Self> {
        if let Some(name) = payload.strip_prefix(OPEN_PREFIX) {
            if name.is_empty() {
                return None;
            }
            return Some(CallbackAction::Open(name.to_string()));
        }
        if let Some(key) = payload.strip_prefix(EDIT_PREFIX) {
            return Field::parse(key).map(CallbackAction::Edit);
        }
        match payload {
            "commit" => Some(CallbackAction::Commit),
            "create" => Some(CallbackAction::Create),
            "cancel" => Some(CallbackAction::Cancel),
            _ => None,
        }
    }

    /// Payload string for a button carrying this action.
    pub fn payload(&self) -> String {
        match self {
            CallbackAction::Open(name) => format!("{}{}", OPEN_PREFIX, name),
            CallbackAction::Edit(field) => format!("{}{}", EDIT_PREFIX, field.key()),
            CallbackAction::Commit => "commit".to_string(),
            CallbackAction::Create => "create".to_string(),
            CallbackAction::Cancel => "cancel".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_carries_file_name() {
        assert_eq!(
            CallbackAction::parse("open:foo.md"),
            Some(CallbackAction::Open("foo.md".to_string()))
        );
        assert_eq!(CallbackAction::parse("open:"), None);
    }

    #[test]
    fn test_parse_edit_maps_field_keys() {
        assert_eq!(
            CallbackAction::parse("edit:title"),
            Some(CallbackAction::Edit(Field::Title))
        );
        assert_eq!(
            CallbackAction::parse("edit:datePublished"),
            Some(CallbackAction::Edit(Field::DatePublished))
        );
        assert_eq!(CallbackAction::parse("edit:author"), None);
    }

    #[test]
    fn test_parse_bare_verbs() {
        assert_eq!(CallbackAction::parse("commit"), Some(CallbackAction::Commit));
        assert_eq!(CallbackAction::parse("create"), Some(CallbackAction::Create));
        assert_eq!(CallbackAction::parse("cancel"), Some(CallbackAction::Cancel));
        assert_eq!(CallbackAction::parse("nonsense"), None);
    }

    #[test]
    fn test_payload_round_trip() {
        for action in [
            CallbackAction::Open("a.md".to_string()),
            CallbackAction::Edit(Field::Content),
            CallbackAction::Commit,
            CallbackAction::Create,
            CallbackAction::Cancel,
        ] {
            assert_eq!(CallbackAction::parse(&action.payload()), Some(action));
        }
    }
}
