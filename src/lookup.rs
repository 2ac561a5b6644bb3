//! Result of a cache lookup.

/// Outcome of [`Cache::get`](crate::cache::Cache::get).
///
/// A miss is an ordinary outcome rather than an error; callers choose how to
/// unwrap it.
///
/// ```
/// use recency::lookup::Lookup;
///
/// let hit = Lookup::Found(3);
/// let miss: Lookup<i32> = Lookup::NotFound;
/// assert_eq!(hit.unwrap_or(0), 3);
/// assert_eq!(miss.unwrap_or(0), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Lookup<V> {
    Found(V),
    NotFound,
}

impl<V> Lookup<V> {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        !self.is_found()
    }

    /// Returns the found value or `default`.
    #[inline]
    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Lookup::Found(value) => value,
            Lookup::NotFound => default,
        }
    }

    #[inline]
    pub fn unwrap_or_else(self, f: impl FnOnce() -> V) -> V {
        match self {
            Lookup::Found(value) => value,
            Lookup::NotFound => f(),
        }
    }

    #[inline]
    pub fn into_option(self) -> Option<V> {
        self.into()
    }

    #[inline]
    pub fn as_ref(&self) -> Lookup<&V> {
        match self {
            Lookup::Found(value) => Lookup::Found(value),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<V> From<Option<V>> for Lookup<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

impl<V> From<Lookup<V>> for Option<V> {
    fn from(lookup: Lookup<V>) -> Self {
        match lookup {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_and_not_found_predicates() {
        assert!(Lookup::Found(1).is_found());
        assert!(Lookup::<i32>::NotFound.is_not_found());
    }

    #[test]
    fn unwrap_or_else_only_runs_on_miss() {
        let mut calls = 0;
        let v = Lookup::Found(5).unwrap_or_else(|| {
            calls += 1;
            0
        });
        assert_eq!(v, 5);
        assert_eq!(calls, 0);

        let v = Lookup::NotFound.unwrap_or_else(|| {
            calls += 1;
            9
        });
        assert_eq!(v, 9);
        assert_eq!(calls, 1);
    }

    #[test]
    fn option_conversions() {
        assert_eq!(Lookup::from(Some("x")), Lookup::Found("x"));
        assert_eq!(Lookup::<&str>::from(None), Lookup::NotFound);
        assert_eq!(Lookup::Found(2).into_option(), Some(2));
        assert_eq!(Lookup::<u8>::NotFound.into_option(), None);
    }

    #[test]
    fn map_and_as_ref() {
        let hit = Lookup::Found(String::from("abc"));
        assert_eq!(hit.as_ref().map(|s| s.len()), Lookup::Found(3));
        assert_eq!(hit.map(|s| s.to_uppercase()), Lookup::Found("ABC".into()));
    }
}
