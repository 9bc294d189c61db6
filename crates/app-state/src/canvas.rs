//! Free-positioned canvas elements (video, image, text, shape overlays).
//!
//! Canvas edits are not recorded in history.

use serde::{Deserialize, Serialize};
use studio_common::{new_id, SkipReason};

use crate::state::Properties;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasElementKind {
    Video,
    Image,
    Text,
    Shape,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CanvasElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
    #[serde(default)]
    pub properties: Properties,
}

/// A canvas element without id, as handed to `add_element`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElementDraft {
    #[serde(rename = "type")]
    pub kind: CanvasElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub properties: Properties,
}

fn full_opacity() -> f64 {
    1.0
}

impl CanvasElementDraft {
    /// An unrotated, fully opaque element.
    pub fn new(kind: CanvasElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: full_opacity(),
            properties: Properties::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasElementUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub properties: Option<Properties>,
}

impl CanvasElementUpdate {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    fn apply_to(&self, element: &mut CanvasElement) {
        if let Some(v) = self.x {
            element.x = v;
        }
        if let Some(v) = self.y {
            element.y = v;
        }
        if let Some(v) = self.width {
            element.width = v;
        }
        if let Some(v) = self.height {
            element.height = v;
        }
        if let Some(v) = self.rotation {
            element.rotation = v;
        }
        if let Some(v) = self.opacity {
            element.opacity = v;
        }
        if let Some(properties) = &self.properties {
            element.properties = properties.clone();
        }
    }
}

/// Canvas elements in insertion order plus the selected element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    elements: Vec<CanvasElement>,
    selected: Option<String>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element under a fresh id and return the id.
    pub fn add(&mut self, draft: CanvasElementDraft) -> String {
        let id = new_id("element");
        self.elements.push(CanvasElement {
            id: id.clone(),
            kind: draft.kind,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            rotation: draft.rotation,
            opacity: draft.opacity,
            properties: draft.properties,
        });
        tracing::debug!(element_id = %id, "Canvas element added");
        id
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn remove(&mut self, element_id: &str) -> Result<(), SkipReason> {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != element_id);
        if self.elements.len() == before {
            return Err(SkipReason::ElementNotFound(element_id.to_string()));
        }
        if self.selected.as_deref() == Some(element_id) {
            self.selected = None;
        }
        tracing::debug!(element_id, "Canvas element removed");
        Ok(())
    }

    pub fn update(&mut self, element_id: &str, update: &CanvasElementUpdate) -> Result<(), SkipReason> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| e.id == element_id)
            .ok_or_else(|| SkipReason::ElementNotFound(element_id.to_string()))?;
        update.apply_to(element);
        Ok(())
    }

    /// Select an element, or clear the selection with `None`.
    pub fn select(&mut self, element_id: Option<&str>) -> Result<(), SkipReason> {
        if let Some(id) = element_id {
            if self.element(id).is_none() {
                return Err(SkipReason::ElementNotFound(id.to_string()));
            }
        }
        self.selected = element_id.map(str::to_owned);
        Ok(())
    }

    pub fn element(&self, element_id: &str) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
