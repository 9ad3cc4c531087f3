//! Per-object edit state registry.
//!
//! A session tracks any number of independent images ("objects"), each
//! owning its own mods: offset, size, crop, rotation, filters, strokes.
//! Selecting an object mirrors its stored mods into the live editing state;
//! the live state is written back after every setter and every undo/redo so
//! switching away and back always lands on the exact edit point.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filters::FiltersState;
use crate::geometry::{Point, Region, Size};
use crate::strokes::Stroke;

/// The persisted edit state of one object - a snapshot minus its source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectMods {
    pub offset: Point,
    pub img_size: Option<Size>,
    pub crop: Option<Region>,
    pub rotation: i32,
    pub filters: FiltersState,
    pub strokes: Vec<Stroke>,
}

impl Default for ObjectMods {
    fn default() -> Self {
        Self {
            offset: Point::default(),
            img_size: None,
            crop: None,
            rotation: 0,
            filters: FiltersState::default(),
            strokes: Vec::new(),
        }
    }
}

/// One tracked image and its current edit state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorObject {
    pub id: String,
    pub src: Option<String>,
    pub mods: ObjectMods,
}

/// Maps opaque object ids to their edit states and tracks the selection.
#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
    objects: HashMap<String, EditorObject>,
    current: Option<String>,
}

impl ObjectRegistry {
    /// Create the object on first reference (capturing `baseline` as its
    /// mods, with no history entry; the image-load completion pushes the
    /// baseline snapshot); for a known id, update only its source when one
    /// is given. Either way the object becomes the selection.
    pub fn create_or_select(
        &mut self,
        id: &str,
        src: Option<String>,
        baseline: ObjectMods,
    ) -> &EditorObject {
        match self.objects.entry(id.to_string()) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(EditorObject {
                    id: id.to_string(),
                    src,
                    mods: baseline,
                });
            }
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                if let Some(src) = src {
                    entry.get_mut().src = Some(src);
                }
            }
        }
        self.current = Some(id.to_string());
        &self.objects[id]
    }

    pub fn current(&self) -> Option<&EditorObject> {
        self.current.as_deref().and_then(|id| self.objects.get(id))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&EditorObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Copy the live editing state into the active object's mods.
    /// No-op when nothing is selected.
    pub fn save_mods(&mut self, mods: ObjectMods) {
        if let Some(obj) = self
            .current
            .as_deref()
            .and_then(|id| self.objects.get_mut(id))
        {
            obj.mods = mods;
        }
    }

    /// Replace the active object's source (e.g. after a crop commit).
    pub fn set_current_src(&mut self, src: Option<String>) {
        if let Some(obj) = self
            .current
            .as_deref()
            .and_then(|id| self.objects.get_mut(id))
        {
            obj.src = src;
        }
    }

    /// Drop all objects and the selection.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.current = None;
    }
}
