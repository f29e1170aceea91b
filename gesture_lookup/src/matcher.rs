use tracing::debug;

use super::entities::*;
use super::error::Result;
use super::match_collector::*;
use super::*;

/// Scores candidate fingerprints against registered gestures.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    threshold: f32,
}

impl Matcher {
    pub fn new(threshold: f32) -> Matcher {
        Matcher {
            threshold: threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Finds the highest-scoring gesture at or above the threshold.
    /// Among equal scores the earliest registered gesture wins. When nothing
    /// reaches the threshold the result has no name and a score of 0.
    pub fn best_match(&self, candidate: &Fingerprint, gestures: &[Gesture]) -> Result<MatchResult> {
        let mut res = MatchResult::none();
        for gesture in gestures {
            let score = candidate.agreement(&gesture.fingerprint)?;
            if score >= self.threshold && score > res.score {
                res = MatchResult {
                    name: Some(gesture.name.clone()),
                    score: score,
                };
            }
        }
        debug!(name = res.name_or_none(), score = res.score, candidates = gestures.len(), "best match");
        Ok(res)
    }

    /// Files every gesture at or above the threshold with the collector.
    pub fn lookup(&self, candidate: &Fingerprint, gestures: &[Gesture], collector: &mut MatchCollector) -> Result<()> {
        for gesture in gestures {
            let score = candidate.agreement(&gesture.fingerprint)?;
            if score >= self.threshold {
                collector.file_match(Match {
                    name: gesture.name.clone(),
                    score: score,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::error::Error;

    // 10x10 fingerprint with the first `n` cells inked
    fn inked(n: usize) -> Fingerprint {
        let mut fp = Fingerprint::new(10);
        for i in 0..n {
            fp.set(i % 10, i / 10);
        }
        fp
    }

    #[test]
    fn test_empty_registry() {
        let res = Matcher::new(0.7).best_match(&inked(30), &[]).unwrap();
        assert_eq!(res, MatchResult { name: None, score: 0.0 });
        assert_eq!(res.name_or_none(), "none");
    }

    #[test]
    fn test_self_match() {
        let gestures = vec![Gesture::new("circle", inked(42))];
        let res = Matcher::new(1.0).best_match(&inked(42), &gestures).unwrap();
        assert_eq!(res, MatchResult { name: Some("circle".to_string()), score: 1.0 });
    }

    #[test]
    fn test_highest_score_wins() {
        let gestures = vec![Gesture::new("A", inked(10)), Gesture::new("B", inked(5))];
        let res = Matcher::new(0.7).best_match(&Fingerprint::new(10), &gestures).unwrap();
        assert_eq!(res, MatchResult { name: Some("B".to_string()), score: 0.95 });
    }

    #[test]
    fn test_below_threshold_reports_zero() {
        let gestures = vec![Gesture::new("A", inked(50))];
        let res = Matcher::new(0.7).best_match(&Fingerprint::new(10), &gestures).unwrap();
        assert_eq!(res, MatchResult { name: None, score: 0.0 });
    }

    #[test]
    fn test_first_registered_wins_ties() {
        let gestures = vec![
            Gesture::new("first", inked(3)),
            Gesture::new("second", inked(3)),
        ];
        let res = Matcher::new(0.5).best_match(&Fingerprint::new(10), &gestures).unwrap();
        assert_eq!(res.name, Some("first".to_string()));
    }

    #[test]
    fn test_length_mismatch() {
        let gestures = vec![Gesture::new("small", Fingerprint::new(8))];
        let res = Matcher::new(0.7).best_match(&inked(1), &gestures);
        assert_eq!(res, Err(Error::LengthMismatch { expected: 100, actual: 64 }));
    }

    #[test]
    fn test_lookup() {
        let gestures = vec![
            Gesture::new("A", inked(10)),
            Gesture::new("B", inked(5)),
            Gesture::new("A", inked(1)),
            Gesture::new("C", inked(40)),
        ];
        let mut matches: Vec<Match> = Vec::new();
        {
            let mut collector = MatchCollector::new(&mut matches, 5);
            Matcher::new(0.7).lookup(&Fingerprint::new(10), &gestures, &mut collector).unwrap();
        }
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].name, "A");
        assert_eq!(matches[0].score, 0.99);
        assert_eq!(matches[1].name, "B");
    }
}
