extern crate serde_derive;
extern crate wasm_bindgen;

mod config;
mod entities;
mod error;
mod match_collector;
mod matcher;
mod normalized_stroke;
mod rasterizer;
mod recognizer;
mod store;
mod stroke_builder;

use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub use config::{RecognizerConfig, MAX_GRID_SIZE};
pub use entities::{Fingerprint, Gesture};
pub use error::{Error, Result};
pub use match_collector::MatchCollector;
pub use matcher::Matcher;
pub use normalized_stroke::{normalize, path_length, resample, NormalizedStroke};
pub use rasterizer::rasterize;
pub use recognizer::{Recognizer, SharedRecognizer};
pub use store::{GestureList, GestureMap, GestureStore};
pub use stroke_builder::StrokeBuilder;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Stroke {
        Stroke {
            points: pairs.iter().map(|&(x, y)| Point { x: x, y: y }).collect(),
        }
    }
}

/// One entry of a ranked lookup
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Match {
    pub name: String,
    pub score: f32,
}

/// Outcome of finding the single best gesture
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Matched gesture, if any reached the threshold
    pub name: Option<String>,
    /// Agreement with the matched gesture; 0 when nothing matched
    pub score: f32,
}

impl MatchResult {
    pub fn none() -> MatchResult {
        MatchResult {
            name: None,
            score: 0f32,
        }
    }

    pub fn is_match(&self) -> bool {
        self.name.is_some()
    }

    pub fn name_or_none(&self) -> &str {
        self.name.as_deref().unwrap_or("none")
    }
}

thread_local!(static RECOGNIZER: RefCell<Recognizer> = RefCell::new(Recognizer::default()));

/// Replaces this thread's recognizer with an empty one using `config`.
pub fn configure(config: RecognizerConfig) -> Result<()> {
    let recognizer = Recognizer::new(config)?;
    RECOGNIZER.with(|cell| {
        *cell.borrow_mut() = recognizer;
    });
    Ok(())
}

pub fn store_typed(name: &str, stroke: &Stroke) -> Result<Fingerprint> {
    RECOGNIZER.with(|cell| cell.borrow_mut().store_gesture(name, stroke))
}

pub fn find_typed(stroke: &Stroke) -> Result<MatchResult> {
    RECOGNIZER.with(|cell| cell.borrow().find_gesture(stroke))
}

pub fn match_typed(stroke: &Stroke, limit: usize) -> Result<Vec<Match>> {
    RECOGNIZER.with(|cell| cell.borrow().lookup(stroke, limit))
}

// Input is vector of [x, y] pairs - how a stroke's points are represented in JS
fn stroke_from_js(input: &JsValue) -> std::result::Result<Stroke, JsValue> {
    let input: Vec<Vec<f32>> = input.into_serde().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut stroke = Stroke {
        points: Vec::with_capacity(input.len()),
    };
    for pair in &input {
        if pair.len() < 2 {
            return Err(JsValue::from_str("Each point must be an [x, y] pair."));
        }
        stroke.points.push(Point {
            x: pair[0],
            y: pair[1],
        });
    }
    Ok(stroke)
}

fn fingerprint_json(fingerprint: &Fingerprint) -> serde_json::Result<String> {
    serde_json::to_string(fingerprint)
}

fn to_js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn configure_json(config: &str) -> std::result::Result<(), JsValue> {
    let config: RecognizerConfig = serde_json::from_str(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    configure(config).map_err(to_js_error)
}

/// Stores the stroke under `name`; returns its fingerprint as JSON: `{"grid_size": ..., "bits": [...]}`
#[wasm_bindgen]
pub fn store_gesture(name: &str, input: &JsValue) -> std::result::Result<String, JsValue> {
    let stroke = stroke_from_js(input)?;
    let fingerprint = store_typed(name, &stroke).map_err(to_js_error)?;
    fingerprint_json(&fingerprint).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Best match as JSON: `{"name": ..., "score": ...}`
#[wasm_bindgen]
pub fn find_gesture(input: &JsValue) -> std::result::Result<String, JsValue> {
    let stroke = stroke_from_js(input)?;
    let res = find_typed(&stroke).map_err(to_js_error)?;
    serde_json::to_string(&res).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Ranked matches as a JSON array
#[wasm_bindgen]
pub fn lookup(input: &JsValue, limit: usize) -> std::result::Result<String, JsValue> {
    let stroke = stroke_from_js(input)?;
    let lookup_res = match_typed(&stroke, limit).map_err(to_js_error)?;
    serde_json::to_string(&lookup_res).map_err(|e| JsValue::from_str(&e.to_string()))
}
