//! Types and functions for storing and loading greetings in memory.

use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
};
use tracing::instrument;
use utoipa::ToSchema;

/// A greeting. Two greetings are equal when their names are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    /// The name to greet, or the greeting itself once transformed.
    #[schema(example = "World")]
    #[serde(default)]
    pub name: Option<String>,
}

impl Greeting {
    /// Constructs a new greeting.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Returns the name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Insertion-ordered greetings without duplicates.
#[derive(Debug, Default)]
struct Greetings {
    ordered: Vec<Greeting>,
    seen: HashSet<Greeting>,
}

/// An in-memory greeting repository, safe to share between requests.
#[derive(Debug, Default)]
pub struct GreetingRepository {
    greetings: Mutex<Greetings>,
}

impl GreetingRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository containing the given names, in order.
    pub fn with_seed<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let repository = Self::new();
        for name in names {
            repository.insert(Greeting::new(name));
        }
        repository
    }

    /// Stores a greeting unless an equal one is already present.
    /// Returns whether the greeting was inserted.
    #[instrument(skip(self))]
    pub fn insert(&self, greeting: Greeting) -> bool {
        let mut greetings = self.lock();
        if greetings.seen.contains(&greeting) {
            tracing::debug!("Greeting already stored");
            return false;
        }
        greetings.seen.insert(greeting.clone());
        greetings.ordered.push(greeting);
        true
    }

    /// Lists all greetings in insertion order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<Greeting> {
        let greetings = self.lock().ordered.clone();
        tracing::debug!("Listed {} greetings", greetings.len());
        greetings
    }

    /// The number of stored greetings.
    pub fn len(&self) -> usize {
        self.lock().ordered.len()
    }

    /// Whether no greetings are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every update is a single push, so a poisoned lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Greetings> {
        self.greetings
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
