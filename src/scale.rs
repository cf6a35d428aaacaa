use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Deref;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::fuzzy_set::FuzzySet;
use crate::membership::MFunction;

new_key_type! {
    /// A level key
    pub struct LevelKey;
}

/// One rung of a fuzzy scale: a linguistic name and its fuzzy set
#[derive(Clone, Debug)]
pub struct Level {
    pub name: String,
    pub f_set: FuzzySet,
}

impl Level {
    pub fn new(name: impl Into<String>, f_set: FuzzySet) -> Self {
        Self {
            name: name.into(),
            f_set,
        }
    }
}

/// An ordered set of uniquely named linguistic levels.
///
/// Starts out as `DefaultScale = {Min, Med, High}`.
#[derive(Clone, Debug)]
pub struct FuzzyScale {
    name: String,
    levels: SlotMap<LevelKey, Level>,
    order: Vec<LevelKey>,
    names: HashMap<String, LevelKey>,
    names_upper: HashMap<String, LevelKey>,
}

impl FuzzyScale {
    pub fn new() -> Self {
        let levels = vec![
            fixed_level("Min", "Minimum", MFunction::hyperbolic(7., 4., 0.), (0., 1.)),
            fixed_level("Med", "Medium", MFunction::bell(0.35, 0.5, 0.6), (0., 1.)),
            fixed_level("High", "High", MFunction::triangle(0.7, 1., 1.), (0., 1.)),
        ];

        Self::fixed("DefaultScale", levels)
    }

    pub fn with_levels(name: impl Into<String>, levels: Vec<Level>) -> Result<Self> {
        let mut this = Self::empty(name.into());

        this.set_levels(levels)?;

        Ok(this)
    }

    fn empty(name: String) -> Self {
        Self {
            name,
            levels: SlotMap::with_key(),
            order: Vec::new(),
            names: HashMap::new(),
            names_upper: HashMap::new(),
        }
    }

    fn fixed(name: &str, levels: Vec<Level>) -> Self {
        Self::with_levels(name, levels).expect("built-in scale levels are unique and non-empty")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Levels in scale order
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &Level> + '_ {
        self.order.iter().map(move |key| &self.levels[*key])
    }

    pub fn keys(&self) -> &[LevelKey] {
        &self.order
    }

    pub fn level(&self, key: LevelKey) -> Option<&Level> {
        self.levels.get(key)
    }

    /// Replaces every level at once.
    ///
    /// The list must be non-empty with unique names; otherwise the scale is left
    /// exactly as it was. Keys of the replaced levels stop resolving.
    pub fn set_levels(&mut self, levels: Vec<Level>) -> Result<()> {
        if levels.is_empty() {
            return Err(FuzzyError::EmptyScale);
        }

        let mut seen = HashSet::with_capacity(levels.len());

        for level in &levels {
            if !seen.insert(level.name.as_str()) {
                return Err(FuzzyError::DuplicateLevel(level.name.clone()));
            }
        }

        // clearing bumps slot versions, so old keys can't alias new levels
        self.levels.clear();
        self.order.clear();
        self.names.clear();
        self.names_upper.clear();

        for level in levels {
            let name = level.name.clone();
            let upper = name.to_uppercase();
            let key = self.levels.insert(level);

            self.order.push(key);
            self.names.insert(name, key);
            // first level wins when names differ only by case
            if let Entry::Vacant(entry) = self.names_upper.entry(upper) {
                entry.insert(key);
            }
        }

        log::debug!("fuzzy scale {} now has {} levels", self.name, self.order.len());

        Ok(())
    }

    /// Key of the level whose membership of `x` is highest. Ties go to the later level.
    pub fn fuzzy_key(&self, x: f64) -> LevelKey {
        let mut keys = self.order.iter().copied();
        let first = keys.next().expect("a fuzzy scale has at least one level");
        let first_mju = self.levels[first].f_set.mju(x);

        let (best, _) = keys.fold((first, first_mju), |(best, best_mju), key| {
            let mju = self.levels[key].f_set.mju(x);

            if best_mju <= mju {
                (key, mju)
            } else {
                (best, best_mju)
            }
        });

        best
    }

    /// Fuzzyfication: the level `x` belongs to the most
    pub fn fuzzy(&self, x: f64) -> &Level {
        &self.levels[self.fuzzy_key(x)]
    }

    /// Finds a level by its name.
    ///
    /// With `exact_matching` the name must be equal to the level's name. Otherwise
    /// the case is ignored and the query may be any part of the name: `"Hig"`
    /// finds `High`. A case-insensitive full match is preferred, then the first
    /// level in scale order containing the query.
    pub fn get_level_by_name(&self, name: &str, exact_matching: bool) -> Option<&Level> {
        if exact_matching {
            return self.names.get(name).map(|key| &self.levels[*key]);
        }

        let query = name.to_uppercase();

        if query.is_empty() {
            return None;
        }

        if let Some(key) = self.names_upper.get(&query) {
            return Some(&self.levels[*key]);
        }

        self.levels().find(|level| level.name.to_uppercase().contains(&query))
    }
}

impl Default for FuzzyScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the scale name, its level names, then one line per fuzzy set:
///
/// ```text
/// DefaultScale = {Min, Med, High}
///     Minimum = <Hyperbolic(x, {"a": 7, "b": 4, "c": 0}), [0.0, 1.0]>
///     ...
/// ```
impl fmt::Display for FuzzyScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {{", self.name)?;

        for (i, level) in self.levels().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&level.name)?;
        }

        f.write_str("}")?;

        for level in self.levels() {
            write!(f, "\n    {}", level.f_set)?;
        }

        Ok(())
    }
}

fn fixed_level(name: &str, set_name: &str, m_function: MFunction, support: (f64, f64)) -> Level {
    let f_set = FuzzySet::new(m_function, support, set_name).expect("built-in fuzzy sets have mass on their support");

    Level::new(name, f_set)
}

/// The universal scale `FuzzyScale = {Min, Low, Med, High, Max}` over [0, 1].
///
/// Its levels are fixed: it derefs to a read-only [`FuzzyScale`].
#[derive(Clone, Debug)]
pub struct UniversalFuzzyScale(FuzzyScale);

impl UniversalFuzzyScale {
    pub fn new() -> Self {
        let levels = vec![
            fixed_level("Min", "Min", MFunction::hyperbolic(8., 20., 0.), (0., 0.23)),
            fixed_level("Low", "Low", MFunction::bell(0.17, 0.23, 0.34), (0.17, 0.4)),
            fixed_level("Med", "Med", MFunction::bell(0.34, 0.4, 0.6), (0.34, 0.66)),
            fixed_level("High", "High", MFunction::bell(0.6, 0.66, 0.77), (0.6, 0.83)),
            fixed_level("Max", "Max", MFunction::parabolic(0.77, 0.95), (0.77, 1.)),
        ];

        Self(FuzzyScale::fixed("FuzzyScale", levels))
    }

    /// An editable copy of this scale
    pub fn to_scale(&self) -> FuzzyScale {
        self.0.clone()
    }
}

impl Default for UniversalFuzzyScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for UniversalFuzzyScale {
    type Target = FuzzyScale;

    fn deref(&self) -> &FuzzyScale {
        &self.0
    }
}

impl fmt::Display for UniversalFuzzyScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
