//! Namespaced action types.
//!
//! Every action has a short upper-case name (`LOADING`). A feature owns a
//! namespace (`services/GetGiphyCats`) and the two together form the action
//! type string `services/GetGiphyCats/LOADING`. Several slices can watch one
//! action stream; each one only reacts to types inside its own namespace.
//!
//! # Example
//!
//! ```
//! use remote_data_core::action::{belongs_to, split_action_type};
//!
//! assert!(belongs_to("containers/Counter", "containers/Counter/INCREMENT"));
//! assert!(!belongs_to("containers/Counter", "services/GetGiphyCats/LOADING"));
//! assert_eq!(
//!     split_action_type("containers/Counter/INCREMENT"),
//!     Some(("containers/Counter", "INCREMENT")),
//! );
//! ```

/// The short name of an action within its feature
pub trait ActionName {
    /// Upper-case action name, e.g. `MAKE_REQUEST`
    fn name(&self) -> &'static str;
}

/// An action that knows which feature namespace it belongs to
pub trait Namespaced: ActionName {
    /// Feature namespace, e.g. `containers/Counter`
    fn namespace(&self) -> &'static str;

    /// Fully qualified action type, `"{namespace}/{name}"`
    fn action_type(&self) -> String {
        format!("{}/{}", self.namespace(), self.name())
    }
}

/// Split an action type into `(namespace, name)` at its last `/`
///
/// Returns `None` when either part would be empty.
#[must_use]
pub fn split_action_type(action_type: &str) -> Option<(&str, &str)> {
    let (namespace, name) = action_type.rsplit_once('/')?;
    if namespace.is_empty() || name.is_empty() {
        return None;
    }
    Some((namespace, name))
}

/// Whether `action_type` lives directly inside `namespace`
#[must_use]
pub fn belongs_to(namespace: &str, action_type: &str) -> bool {
    split_action_type(action_type).is_some_and(|(ns, _)| ns == namespace)
}
