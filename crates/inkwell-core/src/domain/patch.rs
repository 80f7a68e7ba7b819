/// A single field of a partial update.
///
/// `Absent` keeps the stored value. `Set` replaces it, including with an empty
/// value; whether an empty value is legal is decided by the field's validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Absent,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Absent => None,
            Self::Set(value) => Some(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Absent => FieldUpdate::Absent,
            Self::Set(value) => FieldUpdate::Set(f(value)),
        }
    }

    /// Apply the update on top of `current`.
    pub fn apply_to(self, current: &mut T) {
        if let Self::Set(value) = self {
            *current = value;
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Set)
    }
}
