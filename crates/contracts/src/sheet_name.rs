//! SheetName - Cheap-to-clone sheet identifier
//!
//! Uses Arc<str> internally so a name can travel with its stream for free.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::{ContractError, SheetNamePolicy};

/// Name of a logical output stream.
///
/// The name is used verbatim as a file-name stem by file-backed dispatchers.
/// Whether it is checked first is decided by [`SheetNamePolicy`].
///
/// # Examples
/// ```
/// use contracts::SheetName;
///
/// let name: SheetName = "Revenue".into();
/// let name2 = name.clone();
/// assert_eq!(name, name2);
/// assert_eq!(name.as_str(), "Revenue");
/// ```
#[derive(Clone)]
pub struct SheetName(Arc<str>);

impl SheetName {
    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check this name against a policy.
    ///
    /// # Errors
    /// `ContractError::InvalidSheetName` when the policy rejects the name.
    pub fn check(&self, policy: SheetNamePolicy) -> Result<(), ContractError> {
        match policy {
            SheetNamePolicy::Verbatim => Ok(()),
            SheetNamePolicy::Strict => match self.strict_violation() {
                Some(reason) => Err(ContractError::invalid_sheet_name(self.as_str(), reason)),
                None => Ok(()),
            },
        }
    }

    /// Reason the name would escape or break a single path component, if any.
    fn strict_violation(&self) -> Option<&'static str> {
        let name = self.as_str();
        if name.is_empty() {
            return Some("sheet name cannot be empty");
        }
        if name == "." || name == ".." {
            return Some("sheet name cannot be a relative directory reference");
        }
        if name.contains(['/', '\\']) {
            return Some("sheet name cannot contain a path separator");
        }
        if name.contains('\0') {
            return Some("sheet name cannot contain NUL");
        }
        None
    }
}

impl Deref for SheetName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Borrow<str> for SheetName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SheetName {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SheetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SheetName({:?})", self.0)
    }
}

impl PartialEq for SheetName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for SheetName {}

impl PartialEq<str> for SheetName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for SheetName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

// Must match str's hash so `HashMap<SheetName, _>` can be queried with &str
impl Hash for SheetName {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_clone_shares_storage() {
        let a: SheetName = "Revenue".into();
        let b = a.clone();
        assert_eq!(a.as_str().as_ptr(), b.as_str().as_ptr());
    }

    #[test]
    fn test_hashmap_lookup_by_str() {
        let mut map: HashMap<SheetName, usize> = HashMap::new();
        map.insert("Revenue".into(), 1);
        map.insert("Costs".into(), 2);
        assert_eq!(map.get("Revenue"), Some(&1));
        assert_eq!(map.get("Costs"), Some(&2));
    }

    #[test]
    fn test_verbatim_accepts_everything() {
        for name in ["", "..", "../evil", "a/b", "a\\b", "Revenue"] {
            assert!(SheetName::from(name).check(SheetNamePolicy::Verbatim).is_ok());
        }
    }

    #[test]
    fn test_strict_rejects_traversal() {
        for name in ["", ".", "..", "../evil", "nested/sheet", "win\\sheet", "nul\0byte"] {
            let err = SheetName::from(name)
                .check(SheetNamePolicy::Strict)
                .unwrap_err();
            assert!(
                matches!(err, ContractError::InvalidSheetName { .. }),
                "unexpected error for {name:?}: {err}"
            );
        }
    }

    #[test]
    fn test_strict_accepts_plain_names() {
        for name in ["Revenue", "Q1 2024", "sheet.v2", "..hidden"] {
            assert!(SheetName::from(name).check(SheetNamePolicy::Strict).is_ok());
        }
    }
}
