//! Registries of stored gestures.
//!
//! Matching only ever walks `gestures()` front to back, so a store decides
//! both which gestures exist and which one wins a tie.

use std::collections::HashMap;

use super::entities::Gesture;

pub trait GestureStore {
    /// Adds a gesture to the registry.
    fn insert(&mut self, gesture: Gesture);

    /// All registered gestures, in matching order.
    fn gestures(&self) -> &[Gesture];

    fn clear(&mut self);

    fn len(&self) -> usize {
        self.gestures().len()
    }

    fn is_empty(&self) -> bool {
        self.gestures().is_empty()
    }
}

/// Append-only registry; the same name may be stored any number of times.
#[derive(Debug, Clone, Default)]
pub struct GestureList {
    gestures: Vec<Gesture>,
}

impl GestureList {
    pub fn new() -> GestureList {
        GestureList {
            gestures: Vec::new(),
        }
    }
}

impl GestureStore for GestureList {
    fn insert(&mut self, gesture: Gesture) {
        self.gestures.push(gesture);
    }

    fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }

    fn clear(&mut self) {
        self.gestures.clear();
    }
}

/// Registry holding one gesture per name. Storing a name again replaces
/// its fingerprint but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct GestureMap {
    gestures: Vec<Gesture>,
    index: HashMap<String, usize>,
}

impl GestureMap {
    pub fn new() -> GestureMap {
        GestureMap {
            gestures: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Gesture> {
        self.index.get(name).map(|ix| &self.gestures[*ix])
    }
}

impl GestureStore for GestureMap {
    fn insert(&mut self, gesture: Gesture) {
        match self.index.get(&gesture.name) {
            Some(ix) => self.gestures[*ix] = gesture,
            None => {
                self.index.insert(gesture.name.clone(), self.gestures.len());
                self.gestures.push(gesture);
            }
        }
    }

    fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }

    fn clear(&mut self) {
        self.gestures.clear();
        self.index.clear();
    }
}
