//! Facet types: the three independent axes a recording is chosen by.

/// One axis of choice. Each facet has a small fixed set of values with a
/// file-name token and a human label.
pub trait Facet: Copy + Eq + 'static {
    /// Every value, in the order the selection cycles through them.
    const ALL: &'static [Self];

    /// Token used in asset identifiers.
    fn token(&self) -> &'static str;

    /// Label shown in the selection box.
    fn label(&self) -> &'static str;
}

/// Length of the recording, in minutes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DurationBucket {
    Five,
    Ten,
    Fifteen,
    Twenty,
}

impl Facet for DurationBucket {
    const ALL: &'static [Self] = &[Self::Five, Self::Ten, Self::Fifteen, Self::Twenty];

    fn token(&self) -> &'static str {
        match self {
            Self::Five => "5",
            Self::Ten => "10",
            Self::Fifteen => "15",
            Self::Twenty => "20",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Five => "5 min",
            Self::Ten => "10 min",
            Self::Fifteen => "15 min",
            Self::Twenty => "20 min",
        }
    }
}

/// Proficiency of the listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Principiante,
    Intermedio,
    Avanzado,
}

impl Facet for Level {
    const ALL: &'static [Self] = &[Self::Principiante, Self::Intermedio, Self::Avanzado];

    fn token(&self) -> &'static str {
        match self {
            Self::Principiante => "principiante",
            Self::Intermedio => "intermedio",
            Self::Avanzado => "avanzado",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Principiante => "Principiante",
            Self::Intermedio => "Intermedio",
            Self::Avanzado => "Avanzado",
        }
    }
}

/// Whether the narration is mixed over background music.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Music {
    WithMusic,
    Muted,
}

impl Facet for Music {
    const ALL: &'static [Self] = &[Self::WithMusic, Self::Muted];

    fn token(&self) -> &'static str {
        match self {
            Self::WithMusic => "con_musica",
            Self::Muted => "mute",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::WithMusic => "Con música",
            Self::Muted => "Sin música",
        }
    }
}

/// Advance `current` to the next value of its facet.
///
/// Unset moves to the first value; the last value wraps to the first.
pub fn cycle<F: Facet>(current: Option<F>) -> Option<F> {
    let all = F::ALL;
    let next = match current.and_then(|c| all.iter().position(|v| *v == c)) {
        Some(pos) => (pos + 1) % all.len(),
        None => 0,
    };
    all.get(next).copied()
}

/// The user's current choice on each axis. Any of them may be unset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FacetSelection {
    pub duration: Option<DurationBucket>,
    pub level: Option<Level>,
    pub music: Option<Music>,
}

impl FacetSelection {
    /// True when every facet has a value.
    pub fn is_complete(&self) -> bool {
        self.duration.is_some() && self.level.is_some() && self.music.is_some()
    }
}
