use super::Match;

/// Keeps the best `max` matches, highest score first, one entry per gesture name.
pub struct MatchCollector<'a> {
    max: usize,
    matches: &'a mut Vec<Match>,
}

impl<'a> MatchCollector<'a> {
    pub fn new(matches: &mut Vec<Match>, max: usize) -> MatchCollector {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        assert!(matches.len() == 0, "The pre-existing matches vector must be empty.");
        MatchCollector {
            max: max,
            matches: matches,
        }
    }

    fn remove_existing_lower(&mut self, mc: &Match) -> bool {
        let ix = match self.matches.iter().position(|x| x.name == mc.name) {
            Some(ix) => ix,
            // Not there yet: we're good, match doesn't need to be skipped
            None => return false,
        };
        // New score is not better: skip new match
        if mc.score <= self.matches[ix].score {
            return true;
        }
        // Remove existing match; don't skip new. Means shifting array left.
        self.matches.remove(ix);
        false
    }

    pub fn file_match(&mut self, mc: Match) {
        // Already at limit: don't bother if new match's score is not above current minimum
        if let Some(last) = self.matches.last() {
            if self.matches.len() == self.max && mc.score <= last.score {
                return;
            }
        }
        // Same gesture already filed with a score at least as good: skip new match
        if self.remove_existing_lower(&mc) {
            return;
        }
        // Keep array sorted largest score to smallest; equal scores keep filing order.
        let ix = self.matches.iter().position(|x| x.score < mc.score);
        match ix {
            Some(ix) => self.matches.insert(ix, mc),
            None => self.matches.push(mc)
        }
        // Beyond limit? Drop last item.
        if self.matches.len() > self.max {
            self.matches.pop();
        }
    }
}
