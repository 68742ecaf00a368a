/// Optional keep rule with the amount of dice to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keep {
    High(u64),
    Low(u64),
}

impl Keep {
    pub fn count(&self) -> u64 {
        match *self {
            Keep::High(n) | Keep::Low(n) => n,
        }
    }

    /// Mark which of the values, in roll order, are kept.
    ///
    /// Indices are stable sorted by value so equal values keep their roll order
    /// and the earlier draw wins the tie.
    pub(crate) fn select(&self, values: &[u64]) -> Vec<bool> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        match self {
            Keep::High(_) => order.sort_by(|&a, &b| values[b].cmp(&values[a])),
            Keep::Low(_) => order.sort_by(|&a, &b| values[a].cmp(&values[b])),
        }
        let number = usize::try_from(self.count())
            .unwrap_or(usize::MAX)
            .min(values.len());
        let mut kept = vec![false; values.len()];
        for &index in &order[..number] {
            kept[index] = true;
        }
        kept
    }
}

impl std::fmt::Display for Keep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Keep::High(n) => write!(f, "kh{n}"),
            Keep::Low(n) => write!(f, "kl{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_high_ties_prefer_earlier_draw() {
        let kept = Keep::High(2).select(&[4, 6, 4, 4]);
        assert_eq!(vec![true, true, false, false], kept);
    }

    #[test]
    fn keep_low_ties_prefer_earlier_draw() {
        let kept = Keep::Low(1).select(&[3, 1, 1]);
        assert_eq!(vec![false, true, false], kept);
    }

    #[test]
    fn keep_more_than_rolled() {
        let kept = Keep::High(10).select(&[2, 5]);
        assert_eq!(vec![true, true], kept);
    }

    #[test]
    fn keep_on_nothing() {
        assert!(Keep::Low(3).select(&[]).is_empty());
    }
}
