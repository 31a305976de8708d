//! The serializable unit contract.
//!
//! A unit is one piece of TeX content that can be registered in a toolkit.
//! Units are identified by their [`UnitId`]: the concrete type of the unit
//! (its [`Category`]) combined with the key it was created with.

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

use crate::Target;

static DEFAULT_TARGET: Target = Target::Default;

/// The concrete kind of a unit, used to scope key uniqueness.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    type_id: TypeId,
    name: &'static str,
}

impl Category {
    /// Category of the given unit type.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }

    /// Short type name of the category (e.g. `NewCommand`).
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strip the module path and generic arguments from a type name.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Registry identity of a unit: its category plus its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitId {
    category: Category,
    key: String,
}

impl UnitId {
    /// Create an id from a category and a key.
    pub fn new(category: Category, key: impl Into<String>) -> Self {
        Self {
            category,
            key: key.into(),
        }
    }

    /// Id a unit of type `T` with the given key would have.
    pub fn of<T: Serializable>(key: impl Into<String>) -> Self {
        Self::new(Category::of::<T>(), key)
    }

    /// Get the category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.key)
    }
}

/// A registrable piece of TeX content.
///
/// Implement this trait to add new kinds of content to a toolkit. Only
/// [`key`](Serializable::key) and [`serialize`](Serializable::serialize) are
/// required; units that can be routed somewhere other than the default
/// output also override [`target`](Serializable::target).
///
/// # Example
///
/// ```
/// use texkit_core::Serializable;
///
/// struct Texttt {
///     key: String,
///     code: String,
/// }
///
/// impl Serializable for Texttt {
///     fn key(&self) -> &str {
///         &self.key
///     }
///
///     fn serialize(&self) -> String {
///         format!("\\texttt{{{}}}", self.code)
///     }
/// }
///
/// let unit = Texttt { key: "code1".into(), code: "val x = 10".into() };
/// assert_eq!(unit.serialize(), "\\texttt{val x = 10}");
/// assert_eq!(unit.id().to_string(), "Texttt:code1");
/// ```
pub trait Serializable: Any + Send + Sync {
    /// Key identifying this unit within its category.
    fn key(&self) -> &str;

    /// Produce the TeX fragment for this unit.
    ///
    /// Must be idempotent: calling it twice yields identical output.
    fn serialize(&self) -> String;

    /// Where this unit should be written to.
    fn target(&self) -> &Target {
        &DEFAULT_TARGET
    }

    /// Category of the concrete unit type.
    fn category(&self) -> Category {
        Category::of::<Self>()
    }

    /// Registry identity of this unit.
    fn id(&self) -> UnitId {
        UnitId::new(self.category(), self.key())
    }
}

impl dyn Serializable {
    /// Check whether the unit is of type `T`.
    pub fn is<T: Serializable>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcast to the concrete unit type.
    pub fn downcast_ref<T: Serializable>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Serializable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializable")
            .field("id", &self.id())
            .field("target", self.target())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(String);

    impl Serializable for Plain {
        fn key(&self) -> &str {
            &self.0
        }

        fn serialize(&self) -> String {
            self.0.clone()
        }
    }

    struct Other(String);

    impl Serializable for Other {
        fn key(&self) -> &str {
            &self.0
        }

        fn serialize(&self) -> String {
            format!("other {}", self.0)
        }
    }

    #[test]
    fn test_id_display() {
        let unit = Plain("mystr".to_string());
        assert_eq!(unit.id().to_string(), "Plain:mystr");
        assert_eq!(unit.category().name(), "Plain");
    }

    #[test]
    fn test_same_category_same_key_collides() {
        let a = Plain("x".to_string());
        let b = Plain("x".to_string());
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_different_category_same_key_isolated() {
        let a = Plain("x".to_string());
        let b = Other("x".to_string());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_id_of_matches_instance() {
        let unit = Plain("k".to_string());
        assert_eq!(UnitId::of::<Plain>("k"), unit.id());
    }

    #[test]
    fn test_default_target() {
        let unit = Plain("k".to_string());
        assert!(matches!(unit.target(), Target::Default));
    }

    #[test]
    fn test_downcast() {
        let boxed: Box<dyn Serializable> = Box::new(Other("k".to_string()));
        assert!(boxed.is::<Other>());
        assert!(boxed.downcast_ref::<Plain>().is_none());
        assert_eq!(boxed.downcast_ref::<Other>().unwrap().0, "k");
        // dispatch goes to the concrete type, not the trait object
        assert_eq!(boxed.id().to_string(), "Other:k");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::NewCommand"), "NewCommand");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
