// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distribution of extra (or missing) line width over character sides.

/// Order in which characters give up or take on justification space.
///
/// Lower priorities are consumed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Priority {
    /// Kashida elongation.
    Kashida = 0,
    /// Space between words.
    Whitespace = 1,
    /// Space between characters.
    Interchar = 2,
    /// Never takes part.
    #[default]
    None = 3,
}

impl Priority {
    /// The priorities that take part, in the order they are consumed.
    pub const ACTIVE: [Self; 3] = [Self::Kashida, Self::Whitespace, Self::Interchar];
}

/// How one side of the justification (grow or shrink) applies to a character.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Stretch {
    /// The tier this character participates in.
    pub priority: Priority,
    /// Most the left side may change while its tier is within limits.
    pub left_limit: f32,
    /// Most the right side may change while its tier is within limits.
    pub right_limit: f32,
    /// Whether this character takes the excess once its tier's limits are exhausted.
    pub absorb: bool,
}

impl Stretch {
    /// A stretch that never participates before the last tier and has no room.
    pub const NONE: Self = Self {
        priority: Priority::None,
        left_limit: 0.0,
        right_limit: 0.0,
        absorb: false,
    };

    /// Creates a stretch.
    pub fn new(priority: Priority, left_limit: f32, right_limit: f32, absorb: bool) -> Self {
        Self {
            priority,
            left_limit,
            right_limit,
            absorb,
        }
    }
}

/// Justification behavior of a single character.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct JustificationInfo {
    /// Share of its tier's space this character takes, relative to the others.
    pub weight: f32,
    /// Behavior when the line grows.
    pub grow: Stretch,
    /// Behavior when the line shrinks.
    pub shrink: Stretch,
}

impl JustificationInfo {
    /// A character that does not justify.
    pub const NONE: Self = Self {
        weight: 0.0,
        grow: Stretch::NONE,
        shrink: Stretch::NONE,
    };

    /// The behavior of a word space in a font of `size`.
    pub fn whitespace(size: f32) -> Self {
        Self {
            weight: size,
            grow: Stretch::new(Priority::Whitespace, 0.0, size, true),
            shrink: Stretch::new(Priority::Whitespace, 0.0, size / 4.0, true),
        }
    }

    /// The behavior of an ideograph or syllable block in a font of `size`.
    pub fn ideographic(size: f32) -> Self {
        Self {
            weight: size,
            grow: Stretch::new(Priority::Interchar, size, size, true),
            shrink: Stretch::NONE,
        }
    }

    /// The behavior of an embedded graphic of `advance`.
    pub fn graphic(advance: f32) -> Self {
        Self {
            weight: advance,
            grow: Stretch::new(Priority::Interchar, advance / 3.0, advance / 3.0, true),
            shrink: Stretch::new(Priority::Whitespace, 0.0, 0.0, false),
        }
    }

    fn stretch(&self, grow: bool) -> &Stretch {
        if grow { &self.grow } else { &self.shrink }
    }
}

/// Computes per-side deltas for a visually ordered run of justification infos.
///
/// `None` entries never participate. Only `start..limit` is considered; the left side of the
/// first info and the right side of the last are left alone, since they face the line ends.
#[derive(Clone, Debug)]
pub struct Justifier<'a> {
    infos: &'a [Option<JustificationInfo>],
    start: usize,
    limit: usize,
}

impl<'a> Justifier<'a> {
    /// Creates a justifier over `infos[start..limit]`.
    ///
    /// The range is clamped to the slice.
    pub fn new(infos: &'a [Option<JustificationInfo>], start: usize, limit: usize) -> Self {
        let limit = limit.min(infos.len());
        Self {
            infos,
            start: start.min(limit),
            limit,
        }
    }

    /// Distributes `delta` and returns two deltas (left, right) per info.
    ///
    /// The returned vector covers the whole slice; entries outside `start..limit` are zero.
    pub fn justify(&self, mut delta: f32) -> Vec<f32> {
        let mut deltas = vec![0.0; self.infos.len() * 2];
        let grow = delta > 0.0;
        let mut fallback: Option<Priority> = None;
        let mut tiers = Priority::ACTIVE.iter().copied();

        while delta != 0.0 {
            let (priority, last_pass) = match tiers.next() {
                Some(priority) => (priority, false),
                None => match fallback {
                    Some(priority) => (priority, true),
                    None => break,
                },
            };

            let mut weight = 0.0;
            let mut limit = 0.0;
            let mut absorb_weight = 0.0;
            for (i, info) in self.tier(priority, grow) {
                let stretch = info.stretch(grow);
                fallback.get_or_insert(priority);
                if i != self.start {
                    weight += info.weight;
                    limit += stretch.left_limit;
                    if stretch.absorb {
                        absorb_weight += info.weight;
                    }
                }
                if i + 1 != self.limit {
                    weight += info.weight;
                    limit += stretch.right_limit;
                    if stretch.absorb {
                        absorb_weight += info.weight;
                    }
                }
            }

            if !grow {
                limit = -limit;
            }
            let hit_limit = weight == 0.0 || (!last_pass && ((delta < 0.0) == (delta < limit)));
            let absorbing = hit_limit && absorb_weight > 0.0;
            let weighted_delta = delta / weight;
            let weighted_absorb = if absorbing {
                (delta - limit) / absorb_weight
            } else {
                0.0
            };
            log::trace!(
                "justify pass {priority:?}: delta {delta}, weight {weight}, limit {limit}, hit_limit {hit_limit}, absorbing {absorbing}"
            );

            for (i, info) in self.tier(priority, grow) {
                let stretch = info.stretch(grow);
                let sides = [
                    (i != self.start, stretch.left_limit),
                    (i + 1 != self.limit, stretch.right_limit),
                ];
                for (side, (active, side_limit)) in sides.into_iter().enumerate() {
                    if !active {
                        continue;
                    }
                    let slot = &mut deltas[i * 2 + side];
                    if hit_limit {
                        *slot += if grow { side_limit } else { -side_limit };
                        if absorbing {
                            *slot += info.weight * weighted_absorb;
                        }
                    } else {
                        *slot += info.weight * weighted_delta;
                    }
                }
            }

            if !last_pass && hit_limit && !absorbing {
                delta -= limit;
            } else {
                delta = 0.0;
            }
        }
        deltas
    }

    fn tier(
        &self,
        priority: Priority,
        grow: bool,
    ) -> impl Iterator<Item = (usize, &'a JustificationInfo)> + 'a {
        let infos = self.infos;
        (self.start..self.limit).filter_map(move |i| {
            let info = infos[i].as_ref()?;
            (info.stretch(grow).priority == priority).then_some((i, info))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{JustificationInfo, Justifier, Priority, Stretch};

    fn uniform(count: usize, info: JustificationInfo) -> Vec<Option<JustificationInfo>> {
        vec![Some(info); count]
    }

    fn unlimited() -> JustificationInfo {
        let stretch = Stretch::new(Priority::Interchar, f32::INFINITY, f32::INFINITY, false);
        JustificationInfo {
            weight: 1.0,
            grow: stretch,
            shrink: stretch,
        }
    }

    fn total(deltas: &[f32]) -> f32 {
        deltas.iter().sum()
    }

    #[test]
    fn zero_delta_is_all_zeros() {
        let infos = uniform(5, unlimited());
        let deltas = Justifier::new(&infos, 0, 5).justify(0.0);
        assert_eq!(deltas.len(), 10);
        assert!(deltas.iter().all(|d| *d == 0.0));
    }

    #[test]
    fn proportional_share_within_limits() {
        let infos = uniform(10, unlimited());
        let deltas = Justifier::new(&infos, 0, 10).justify(50.0);
        assert!((total(&deltas) - 50.0).abs() < 1e-3);
        // Outer sides never move.
        assert_eq!(deltas[0], 0.0);
        assert_eq!(deltas[19], 0.0);
        let share = 50.0 / 18.0;
        assert!((deltas[1] - share).abs() < 1e-4);
        assert!((deltas[2] - share).abs() < 1e-4);
    }

    #[test]
    fn shrinks_within_limits() {
        let infos = uniform(4, unlimited());
        let deltas = Justifier::new(&infos, 0, 4).justify(-6.0);
        assert!((total(&deltas) + 6.0).abs() < 1e-4);
        assert!(deltas.iter().all(|d| *d <= 0.0));
    }

    #[test]
    fn lower_priority_is_consumed_first() {
        let space = JustificationInfo::whitespace(10.0);
        let letter = JustificationInfo {
            weight: 1.0,
            grow: Stretch::new(Priority::Interchar, 5.0, 5.0, false),
            shrink: Stretch::NONE,
        };
        let infos = vec![Some(letter), Some(space), Some(letter)];
        // The space can take 10 on its right side, which covers the whole delta.
        let deltas = Justifier::new(&infos, 0, 3).justify(4.0);
        assert!((deltas[2] + deltas[3] - 4.0).abs() < 1e-4);
        assert_eq!(deltas[1], 0.0);
        assert_eq!(deltas[4], 0.0);
    }

    #[test]
    fn exhausted_tier_passes_remainder_on() {
        let capped = JustificationInfo {
            weight: 1.0,
            grow: Stretch::new(Priority::Whitespace, 1.0, 1.0, false),
            shrink: Stretch::NONE,
        };
        let loose = JustificationInfo {
            weight: 1.0,
            grow: Stretch::new(Priority::Interchar, 100.0, 100.0, false),
            shrink: Stretch::NONE,
        };
        let infos = vec![Some(loose), Some(capped), Some(loose)];
        let deltas = Justifier::new(&infos, 0, 3).justify(10.0);
        // The whitespace tier gives its full limit of 2, the rest goes to the letters.
        assert_eq!(deltas[2], 1.0);
        assert_eq!(deltas[3], 1.0);
        assert!((total(&deltas) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn absorbing_characters_take_excess_by_weight() {
        let light = JustificationInfo {
            weight: 1.0,
            grow: Stretch::new(Priority::Whitespace, 0.0, 0.0, true),
            shrink: Stretch::NONE,
        };
        let heavy = JustificationInfo {
            weight: 3.0,
            ..light
        };
        let infos = vec![Some(light), Some(heavy), Some(light)];
        let deltas = Justifier::new(&infos, 0, 3).justify(16.0);
        assert!((total(&deltas) - 16.0).abs() < 1e-4);
        // Weight 3 sides get three times what weight 1 sides get.
        assert!((deltas[2] - 3.0 * deltas[1]).abs() < 1e-4);
        assert!(deltas[2] > deltas[1]);
    }

    #[test]
    fn no_participants_leaves_line_alone() {
        let infos = uniform(3, JustificationInfo::NONE);
        let deltas = Justifier::new(&infos, 0, 3).justify(12.0);
        assert!(deltas.iter().all(|d| *d == 0.0));
    }

    #[test]
    fn none_entries_and_range_are_respected() {
        let mut infos = uniform(6, unlimited());
        infos[0] = None;
        infos[5] = None;
        let deltas = Justifier::new(&infos, 1, 5).justify(6.0);
        assert_eq!(&deltas[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&deltas[9..12], &[0.0, 0.0, 0.0]);
        assert!((total(&deltas) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn second_pass_with_no_extra_space_is_noop() {
        let infos = uniform(4, unlimited());
        let first = Justifier::new(&infos, 0, 4).justify(9.0);
        assert!((total(&first) - 9.0).abs() < 1e-4);
        let second = Justifier::new(&infos, 0, 4).justify(0.0);
        assert!(second.iter().all(|d| *d == 0.0));
    }
}
