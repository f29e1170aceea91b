use parking_lot::RwLock;
use tracing::{debug, info};

use super::config::RecognizerConfig;
use super::entities::*;
use super::error::Result;
use super::match_collector::*;
use super::matcher::*;
use super::normalized_stroke::*;
use super::rasterizer::rasterize;
use super::store::*;
use super::*;

/// Turns strokes into fingerprints and matches them against a registry.
pub struct Recognizer<S: GestureStore = GestureList> {
    config: RecognizerConfig,
    matcher: Matcher,
    store: S,
}

impl Default for Recognizer<GestureList> {
    fn default() -> Self {
        let config = RecognizerConfig::default();
        Recognizer {
            config: config,
            matcher: Matcher::new(config.match_threshold),
            store: GestureList::new(),
        }
    }
}

impl Recognizer<GestureList> {
    pub fn new(config: RecognizerConfig) -> Result<Recognizer<GestureList>> {
        Recognizer::with_store(config, GestureList::new())
    }
}

impl<S: GestureStore> Recognizer<S> {
    pub fn with_store(config: RecognizerConfig, store: S) -> Result<Recognizer<S>> {
        config.validate()?;
        Ok(Recognizer {
            config: config,
            matcher: Matcher::new(config.match_threshold),
            store: store,
        })
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gestures(&self) -> &[Gesture] {
        self.store.gestures()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Runs resampling, normalization and rasterization on a stroke.
    pub fn fingerprint(&self, stroke: &Stroke) -> Result<Fingerprint> {
        let normalized = NormalizedStroke::from_stroke(stroke, self.config.resample_count())?;
        debug!(raw = stroke.points.len(), resampled = normalized.points.len(), "normalized stroke");
        rasterize(&normalized.points, self.config.grid_size, self.config.stroke_thickness())
    }

    /// Fingerprints the stroke and registers it under `name`.
    pub fn store_gesture(&mut self, name: &str, stroke: &Stroke) -> Result<Fingerprint> {
        let fingerprint = self.fingerprint(stroke)?;
        self.store.insert(Gesture::new(name, fingerprint.clone()));
        info!(name = name, count = self.store.len(), "gesture stored");
        Ok(fingerprint)
    }

    /// Best registered gesture for the stroke, or no name with a score of 0.
    pub fn find_gesture(&self, stroke: &Stroke) -> Result<MatchResult> {
        let fingerprint = self.fingerprint(stroke)?;
        self.matcher.best_match(&fingerprint, self.store.gestures())
    }

    /// Up to `limit` gestures at or above the threshold, best first, one per name.
    pub fn lookup(&self, stroke: &Stroke, limit: usize) -> Result<Vec<Match>> {
        let fingerprint = self.fingerprint(stroke)?;
        let mut res: Vec<Match> = Vec::with_capacity(limit);
        if limit == 0 {
            return Ok(res);
        }
        {
            let mut collector = MatchCollector::new(&mut res, limit);
            self.matcher.lookup(&fingerprint, self.store.gestures(), &mut collector)?;
        }
        Ok(res)
    }
}

/// A recognizer callers on several threads can store into and match against.
/// Storing takes the lock exclusively; matching shares it.
pub struct SharedRecognizer<S: GestureStore = GestureList> {
    inner: RwLock<Recognizer<S>>,
}

impl<S: GestureStore> SharedRecognizer<S> {
    pub fn new(recognizer: Recognizer<S>) -> SharedRecognizer<S> {
        SharedRecognizer {
            inner: RwLock::new(recognizer),
        }
    }

    pub fn store_gesture(&self, name: &str, stroke: &Stroke) -> Result<Fingerprint> {
        // Rasterize outside the lock; only the insert needs exclusive access
        let fingerprint = self.inner.read().fingerprint(stroke)?;
        let mut recognizer = self.inner.write();
        recognizer.store.insert(Gesture::new(name, fingerprint.clone()));
        info!(name = name, count = recognizer.store.len(), "gesture stored");
        Ok(fingerprint)
    }

    pub fn find_gesture(&self, stroke: &Stroke) -> Result<MatchResult> {
        self.inner.read().find_gesture(stroke)
    }

    pub fn lookup(&self, stroke: &Stroke, limit: usize) -> Result<Vec<Match>> {
        self.inner.read().lookup(stroke, limit)
    }

    pub fn len(&self) -> usize {
        self.inner.read().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().store.is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn into_inner(self) -> Recognizer<S> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::error::Error;
    use std::sync::Arc;
    use std::thread;

    fn swipe_right() -> Stroke {
        Stroke::from_pairs(&[(0.0, 0.0), (10.0, 0.0)])
    }

    fn swipe_up() -> Stroke {
        Stroke::from_pairs(&[(0.0, 0.0), (0.0, 4.0), (0.0, 10.0)])
    }

    // Hand-drawn circle, closed at the top
    fn circle() -> Stroke {
        let mut pairs: Vec<(f32, f32)> = Vec::new();
        for i in 0..=36 {
            let angle = (i as f32) * std::f32::consts::PI * 2.0 / 36.0;
            pairs.push((50.0 + 40.0 * angle.sin(), 50.0 + 40.0 * angle.cos()));
        }
        Stroke::from_pairs(&pairs)
    }

    fn small_config() -> RecognizerConfig {
        RecognizerConfig::new(8, 2).with_resample_count(8)
    }

    #[test]
    fn test_swipe_right_scenario() {
        let mut recognizer = Recognizer::new(small_config()).unwrap();
        let fp = recognizer.store_gesture("swipe-right", &swipe_right()).unwrap();
        assert_eq!(fp.len(), 64);
        // Horizontal band hugging y = 0
        for x in 0..8 {
            assert!(fp.get(x, 0) && fp.get(x, 1));
            assert!(!fp.get(x, 2));
        }
        let res = recognizer.find_gesture(&swipe_right()).unwrap();
        assert_eq!(res, MatchResult { name: Some("swipe-right".to_string()), score: 1.0 });
    }

    #[test]
    fn test_distinguishes_shapes() {
        let mut recognizer = Recognizer::new(RecognizerConfig::default()).unwrap();
        recognizer.store_gesture("swipe-right", &swipe_right()).unwrap();
        recognizer.store_gesture("swipe-up", &swipe_up()).unwrap();
        recognizer.store_gesture("circle", &circle()).unwrap();
        assert_eq!(recognizer.gestures().len(), 3);

        let res = recognizer.find_gesture(&Stroke::from_pairs(&[(5.0, 2.0), (9.0, 2.5), (25.0, 3.0)])).unwrap();
        assert_eq!(res.name, Some("swipe-right".to_string()));
        let res = recognizer.find_gesture(&Stroke::from_pairs(&[(3.0, -20.0), (3.0, 40.0)])).unwrap();
        assert_eq!(res.name, Some("swipe-up".to_string()));
        let res = recognizer.find_gesture(&circle()).unwrap();
        assert_eq!(res, MatchResult { name: Some("circle".to_string()), score: 1.0 });
    }

    #[test]
    fn test_scale_and_translation_invariance() {
        let mut recognizer = Recognizer::new(RecognizerConfig::default()).unwrap();
        recognizer.store_gesture("check", &Stroke::from_pairs(&[(0.0, 10.0), (5.0, 0.0), (20.0, 30.0)])).unwrap();
        let res = recognizer.find_gesture(&Stroke::from_pairs(&[(100.0, 120.0), (110.0, 100.0), (140.0, 160.0)])).unwrap();
        assert_eq!(res, MatchResult { name: Some("check".to_string()), score: 1.0 });
    }

    #[test]
    fn test_empty_registry() {
        let recognizer = Recognizer::new(RecognizerConfig::default()).unwrap();
        let res = recognizer.find_gesture(&circle()).unwrap();
        assert_eq!(res, MatchResult::none());
        assert!(recognizer.lookup(&circle(), 3).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(Recognizer::new(RecognizerConfig::new(0, 4)), Err(Error::InvalidConfiguration(_))));
        let mut recognizer = Recognizer::new(RecognizerConfig::default()).unwrap();
        let dot = Stroke::from_pairs(&[(1.0, 1.0), (1.0, 1.0)]);
        assert!(matches!(recognizer.store_gesture("dot", &dot), Err(Error::InvalidStroke(_))));
        assert!(recognizer.gestures().is_empty());
        assert!(matches!(recognizer.find_gesture(&Stroke::from_pairs(&[(1.0, 1.0)])), Err(Error::InvalidStroke(_))));
    }

    #[test]
    fn test_lookup_ranks_by_name() {
        let mut recognizer = Recognizer::new(RecognizerConfig::default().with_match_threshold(0.0)).unwrap();
        recognizer.store_gesture("circle", &circle()).unwrap();
        recognizer.store_gesture("swipe-right", &swipe_right()).unwrap();
        recognizer.store_gesture("circle", &swipe_up()).unwrap();
        let res = recognizer.lookup(&circle(), 5).unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].name, "circle");
        assert_eq!(res[0].score, 1.0);
        assert_eq!(res[1].name, "swipe-right");
        assert!(recognizer.lookup(&circle(), 0).unwrap().is_empty());
        assert_eq!(recognizer.lookup(&circle(), 1).unwrap().len(), 1);
    }

    #[test]
    fn test_overwrite_by_name() {
        let mut recognizer = Recognizer::with_store(RecognizerConfig::default(), GestureMap::new()).unwrap();
        recognizer.store_gesture("shape", &circle()).unwrap();
        recognizer.store_gesture("shape", &swipe_right()).unwrap();
        assert_eq!(recognizer.gestures().len(), 1);
        let res = recognizer.find_gesture(&swipe_right()).unwrap();
        assert_eq!(res, MatchResult { name: Some("shape".to_string()), score: 1.0 });
        recognizer.clear();
        assert!(recognizer.store().is_empty());
    }

    #[test]
    fn test_shared_recognizer() {
        let shared = Arc::new(SharedRecognizer::new(Recognizer::new(RecognizerConfig::default()).unwrap()));
        let mut handles = Vec::new();
        for i in 0..4 {
            let shared = Arc::clone(&shared);
            handles.push(thread::spawn(move || {
                let name = format!("circle-{}", i);
                shared.store_gesture(&name, &circle()).unwrap();
                shared.find_gesture(&circle()).unwrap()
            }));
        }
        for handle in handles {
            let res = handle.join().unwrap();
            assert_eq!(res.score, 1.0);
        }
        assert_eq!(shared.len(), 4);
        shared.clear();
        assert!(shared.is_empty());
    }
}
