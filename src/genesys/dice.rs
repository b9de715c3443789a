use super::result::Tally;
use std::fmt;

/// The symbols on one face of a narrative die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    Blank,
    Success,
    Failure,
    Advantage,
    Threat,
    Triumph,
    Despair,
    Light,
    Dark,
    SuccessSuccess,
    SuccessAdvantage,
    AdvantageAdvantage,
    FailureFailure,
    FailureThreat,
    ThreatThreat,
    LightLight,
    DarkDark,
}

impl Face {
    /// The single-symbol face written with `letter`.
    pub fn from_symbol(letter: char) -> Option<Self> {
        Some(match letter {
            's' => Self::Success,
            'f' => Self::Failure,
            'a' => Self::Advantage,
            'h' => Self::Threat,
            't' => Self::Triumph,
            'd' => Self::Despair,
            'Z' => Self::Light,
            'z' => Self::Dark,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        use Face::*;

        match self {
            Blank => "",
            Success => "s",
            Failure => "f",
            Advantage => "a",
            Threat => "h",
            Triumph => "t",
            Despair => "d",
            Light => "Z",
            Dark => "z",
            SuccessSuccess => "ss",
            SuccessAdvantage => "sa",
            AdvantageAdvantage => "aa",
            FailureFailure => "ff",
            FailureThreat => "fh",
            ThreatThreat => "hh",
            LightLight => "ZZ",
            DarkDark => "zz",
        }
    }

    /// The symbols this face shows. A triumph also counts as a success and a
    /// despair as a failure.
    pub fn tally(self) -> Tally {
        let mut tally = Tally::default();
        for symbol in self.as_str().chars() {
            match symbol {
                's' => tally.success += 1,
                'f' => tally.failure += 1,
                'a' => tally.advantage += 1,
                'h' => tally.threat += 1,
                't' => {
                    tally.triumph += 1;
                    tally.success += 1;
                }
                'd' => {
                    tally.despair += 1;
                    tally.failure += 1;
                }
                'Z' => tally.light += 1,
                'z' => tally.dark += 1,
                _ => {}
            }
        }
        tally
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("-"),
            face => f.write_str(face.as_str()),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenesysDie {
    Boost,
    Setback,
    Ability,
    Difficulty,
    Proficiency,
    Challenge,
    Force,
}

const BOOST: &[Face] = {
    use Face::*;
    &[Blank, Blank, Success, SuccessAdvantage, AdvantageAdvantage, Advantage]
};

const SETBACK: &[Face] = {
    use Face::*;
    &[Blank, Blank, Failure, Failure, Threat, Threat]
};

const ABILITY: &[Face] = {
    use Face::*;
    &[
        Blank,
        Success,
        Success,
        SuccessSuccess,
        Advantage,
        Advantage,
        SuccessAdvantage,
        AdvantageAdvantage,
    ]
};

const DIFFICULTY: &[Face] = {
    use Face::*;
    &[
        Blank,
        Failure,
        FailureFailure,
        Threat,
        Threat,
        Threat,
        ThreatThreat,
        FailureThreat,
    ]
};

const PROFICIENCY: &[Face] = {
    use Face::*;
    &[
        Blank,
        Success,
        Success,
        SuccessSuccess,
        SuccessSuccess,
        Advantage,
        SuccessAdvantage,
        SuccessAdvantage,
        SuccessAdvantage,
        AdvantageAdvantage,
        AdvantageAdvantage,
        Triumph,
    ]
};

const CHALLENGE: &[Face] = {
    use Face::*;
    &[
        Blank,
        Failure,
        Failure,
        FailureFailure,
        FailureFailure,
        Threat,
        Threat,
        FailureThreat,
        FailureThreat,
        ThreatThreat,
        ThreatThreat,
        Despair,
    ]
};

const FORCE: &[Face] = {
    use Face::*;
    &[
        Dark, Dark, Dark, Dark, Dark, Dark, DarkDark, Light, Light, LightLight, LightLight,
        LightLight,
    ]
};

impl GenesysDie {
    pub const ALL: [Self; 7] = [
        Self::Boost,
        Self::Setback,
        Self::Ability,
        Self::Difficulty,
        Self::Proficiency,
        Self::Challenge,
        Self::Force,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'b' => Self::Boost,
            'k' => Self::Setback,
            'g' => Self::Ability,
            'p' => Self::Difficulty,
            'y' => Self::Proficiency,
            'r' => Self::Challenge,
            'w' => Self::Force,
            _ => return None,
        })
    }

    pub fn letter(self) -> char {
        match self {
            Self::Boost => 'b',
            Self::Setback => 'k',
            Self::Ability => 'g',
            Self::Difficulty => 'p',
            Self::Proficiency => 'y',
            Self::Challenge => 'r',
            Self::Force => 'w',
        }
    }

    /// Faces in the order a roll of `1..=faces().len()` selects them.
    pub fn faces(self) -> &'static [Face] {
        match self {
            Self::Boost => BOOST,
            Self::Setback => SETBACK,
            Self::Ability => ABILITY,
            Self::Difficulty => DIFFICULTY,
            Self::Proficiency => PROFICIENCY,
            Self::Challenge => CHALLENGE,
            Self::Force => FORCE,
        }
    }

    /// The face selected by a roll of `n`, counting from 1.
    pub fn face(self, n: usize) -> Option<Face> {
        n.checked_sub(1).and_then(|i| self.faces().get(i)).copied()
    }
}

impl fmt::Display for GenesysDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boost => "boost",
            Self::Setback => "setback",
            Self::Ability => "ability",
            Self::Difficulty => "difficulty",
            Self::Proficiency => "proficiency",
            Self::Challenge => "challenge",
            Self::Force => "force",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_counts() {
        let sizes: Vec<_> = GenesysDie::ALL.iter().map(|d| d.faces().len()).collect();
        assert_eq!(sizes, [6, 6, 8, 8, 12, 12, 12]);
    }

    #[test]
    fn test_letters_round_trip() {
        for die in GenesysDie::ALL {
            assert_eq!(GenesysDie::from_letter(die.letter()), Some(die));
        }
        assert_eq!(GenesysDie::from_letter('s'), None);
    }

    #[test]
    fn test_face_tally() {
        let triumph = Face::Triumph.tally();
        assert_eq!((triumph.success, triumph.triumph), (1, 1));

        let despair = Face::Despair.tally();
        assert_eq!((despair.failure, despair.despair), (1, 1));

        let mixed = Face::FailureThreat.tally();
        assert_eq!((mixed.failure, mixed.threat, mixed.success), (1, 1, 0));

        assert_eq!(Face::Blank.tally(), Tally::default());
        assert_eq!(Face::LightLight.tally().light, 2);
    }

    #[test]
    fn test_face_selection() {
        assert_eq!(GenesysDie::Proficiency.face(12), Some(Face::Triumph));
        assert_eq!(GenesysDie::Boost.face(1), Some(Face::Blank));
        assert_eq!(GenesysDie::Boost.face(0), None);
        assert_eq!(GenesysDie::Boost.face(7), None);
    }
}
