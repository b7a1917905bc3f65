//! Static shape families.
//!
//! Two tables: [`POLYGONS`] (regular and near-regular polygons) and [`RECTILINEAR`]
//! (hand-authored axis-aligned outlines). Each [`ShapeDefinition`] names a [`ShapeKind`],
//! whose parameters (integer centimetres) determine both the outline and the length of each
//! symmetry group.

use std::f64::consts::{FRAC_PI_3, TAU};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    error::{CatalogueError, InputError},
    generator::Level,
    polygon::Polygon,
    r2::R2,
};

/// Coarse family, used to spread a batch across visually different shapes.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify)]
pub enum Family {
    #[display(fmt = "triangle")]
    Triangle,
    #[display(fmt = "regular")]
    Regular,
    #[display(fmt = "irregular")]
    Irregular,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum Catalogue {
    #[display(fmt = "polygon")]
    Polygon,
    #[display(fmt = "rectilinear")]
    Rectilinear,
}

/// Parametrized outline builders. Parameter order is documented per variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
pub enum ShapeKind {
    /// `[side]`
    Regular,
    /// `[width, height]`
    Rectangle,
    /// `[base, side]`, leaning 60°
    Parallelogram,
    /// `[base, leg]`
    Isosceles,
    /// `[a, b, c]`, longest first; `a` is the base
    Scalene,
    /// `[width, height, cut_width, cut_height]`: rectangle with its top-right corner removed
    Ell,
    /// `[tread, rise]`: three equal steps
    UniformStaircase,
    /// `[width, height, offset, notch_width, notch_depth]`: rectangle with a slot cut into the top
    Notch,
    /// `[w1, w2, w3, h1, h2, h3]`: three steps, treads right to left, rises bottom to top
    Staircase,
}

impl ShapeKind {
    pub fn param_count(&self) -> usize {
        match self {
            ShapeKind::Regular => 1,
            ShapeKind::Rectangle | ShapeKind::Parallelogram | ShapeKind::Isosceles | ShapeKind::UniformStaircase => 2,
            ShapeKind::Scalene => 3,
            ShapeKind::Ell => 4,
            ShapeKind::Notch => 5,
            ShapeKind::Staircase => 6,
        }
    }

    /// Number of symmetry groups this kind assigns lengths to.
    pub fn group_count(&self, sides: usize) -> usize {
        match self {
            ShapeKind::Regular => 1,
            ShapeKind::Rectangle | ShapeKind::Parallelogram | ShapeKind::Isosceles => 2,
            ShapeKind::Scalene => 3,
            ShapeKind::UniformStaircase => 4,
            ShapeKind::Notch => 6,
            ShapeKind::Ell | ShapeKind::Staircase => sides,
        }
    }

    /// Outline in centimetres, first vertex at the origin, y up, counter-clockwise.
    pub fn build(&self, sides: usize, params: &[u32]) -> Polygon {
        assert_eq!(params.len(), self.param_count(), "{:?} takes {} params", self, self.param_count());
        let p: Vec<f64> = params.iter().map(|&v| v as f64).collect();
        let pts = |coords: &[(f64, f64)]| -> Polygon {
            Polygon::new(coords.iter().map(|&(x, y)| R2::new(x, y)).collect())
        };
        match self {
            ShapeKind::Regular => {
                let side = p[0];
                let turn = TAU / sides as f64;
                let mut v = R2::zero();
                let mut vertices = vec![v];
                for k in 0..sides - 1 {
                    v = v + R2::new(1., 0.).rotate(turn * k as f64) * side;
                    vertices.push(v);
                }
                Polygon::new(vertices)
            }
            ShapeKind::Rectangle => {
                let (w, h) = (p[0], p[1]);
                pts(&[(0., 0.), (w, 0.), (w, h), (0., h)])
            }
            ShapeKind::Parallelogram => {
                let (b, s) = (p[0], p[1]);
                let lean = R2::new(1., 0.).rotate(FRAC_PI_3) * s;
                pts(&[(0., 0.), (b, 0.), (b + lean.x, lean.y), (lean.x, lean.y)])
            }
            ShapeKind::Isosceles => {
                let (base, leg) = (p[0], p[1]);
                pts(&[(0., 0.), (base, 0.), (base / 2., isosceles_height(base, leg))])
            }
            ShapeKind::Scalene => {
                let (a, b, c) = (p[0], p[1], p[2]);
                // Apex sits `c` from the origin and `b` from (a, 0)
                let x = (a * a + c * c - b * b) / (2. * a);
                let y = (c * c - x * x).max(0.).sqrt();
                pts(&[(0., 0.), (a, 0.), (x, y)])
            }
            ShapeKind::Ell => {
                let (w, h, cw, ch) = (p[0], p[1], p[2], p[3]);
                pts(&[(0., 0.), (w, 0.), (w, h - ch), (w - cw, h - ch), (w - cw, h), (0., h)])
            }
            ShapeKind::UniformStaircase => {
                let (s, r) = (p[0], p[1]);
                pts(&[
                    (0., 0.),
                    (3. * s, 0.),
                    (3. * s, r),
                    (2. * s, r),
                    (2. * s, 2. * r),
                    (s, 2. * r),
                    (s, 3. * r),
                    (0., 3. * r),
                ])
            }
            ShapeKind::Notch => {
                let (w, h, ox, nw, nd) = (p[0], p[1], p[2], p[3], p[4]);
                pts(&[
                    (0., 0.),
                    (w, 0.),
                    (w, h),
                    (ox + nw, h),
                    (ox + nw, h - nd),
                    (ox, h - nd),
                    (ox, h),
                    (0., h),
                ])
            }
            ShapeKind::Staircase => {
                let (w1, w2, w3, h1, h2, h3) = (p[0], p[1], p[2], p[3], p[4], p[5]);
                let w = w1 + w2 + w3;
                let h = h1 + h2 + h3;
                pts(&[
                    (0., 0.),
                    (w, 0.),
                    (w, h1),
                    (w - w1, h1),
                    (w - w1, h1 + h2),
                    (w3, h1 + h2),
                    (w3, h),
                    (0., h),
                ])
            }
        }
    }

    /// Length of each symmetry group, in the order of [`ShapeDefinition::groups`].
    pub fn group_lengths(&self, params: &[u32]) -> Vec<u32> {
        let p = params;
        match self {
            ShapeKind::Regular => vec![p[0]],
            ShapeKind::Rectangle | ShapeKind::Parallelogram | ShapeKind::Isosceles => vec![p[0], p[1]],
            ShapeKind::Scalene => vec![p[0], p[1], p[2]],
            ShapeKind::Ell => {
                let (w, h, cw, ch) = (p[0], p[1], p[2], p[3]);
                vec![w, h - ch, cw, ch, w - cw, h]
            }
            ShapeKind::UniformStaircase => {
                let (s, r) = (p[0], p[1]);
                vec![3 * s, r, s, 3 * r]
            }
            ShapeKind::Notch => {
                let (w, h, ox, nw, nd) = (p[0], p[1], p[2], p[3], p[4]);
                vec![w, h, w - ox - nw, nd, nw, ox]
            }
            ShapeKind::Staircase => {
                let (w1, w2, w3, h1, h2, h3) = (p[0], p[1], p[2], p[3], p[4], p[5]);
                vec![w1 + w2 + w3, h1, w1, h2, w2, h3, w3, h1 + h2 + h3]
            }
        }
    }
}

/// Height of an isosceles triangle over its base; 0 when the legs can't meet.
pub fn isosceles_height(base: f64, leg: f64) -> f64 {
    (leg * leg - base * base / 4.).max(0.).sqrt()
}

/// One shape family: immutable, defined once in the static tables below.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    pub name: &'static str,
    pub kind: ShapeKind,
    pub sides: usize,
    /// Partition of `0..sides`; edges in one group share a length.
    pub groups: &'static [&'static [usize]],
    pub family: Family,
    pub catalogue: Catalogue,
    /// Lowest level that may draw this shape.
    pub tier: Level,
}

impl ShapeDefinition {
    pub fn group_of(&self, edge: usize) -> usize {
        self.groups
            .iter()
            .position(|g| g.contains(&edge))
            .unwrap_or_else(|| panic!("{}: edge {} is in no symmetry group", self.name, edge))
    }

    pub fn groups_vec(&self) -> Vec<Vec<usize>> {
        self.groups.iter().map(|g| g.to_vec()).collect()
    }

    pub fn validate(&self) -> Result<(), CatalogueError> {
        let name = self.name;
        let sides = self.sides;
        if !(3..=8).contains(&sides) {
            return Err(CatalogueError::SideCount { name, sides });
        }
        let mut seen = vec![false; sides];
        for &edge in self.groups.iter().flat_map(|g| g.iter()) {
            if edge >= sides || seen[edge] {
                return Err(CatalogueError::NotAPartition { name, sides });
            }
            seen[edge] = true;
        }
        if seen.iter().any(|s| !s) || self.groups.iter().any(|g| g.is_empty()) {
            return Err(CatalogueError::NotAPartition { name, sides });
        }
        let expected = self.kind.group_count(sides);
        if self.groups.len() != expected {
            return Err(CatalogueError::GroupCount { name, kind: self.kind, expected, found: self.groups.len() });
        }
        Ok(())
    }
}

pub static POLYGONS: &[ShapeDefinition] = &[
    ShapeDefinition {
        name: "equilateral triangle",
        kind: ShapeKind::Regular,
        sides: 3,
        groups: &[&[0, 1, 2]],
        family: Family::Triangle,
        catalogue: Catalogue::Polygon,
        tier: Level::One,
    },
    ShapeDefinition {
        name: "square",
        kind: ShapeKind::Regular,
        sides: 4,
        groups: &[&[0, 1, 2, 3]],
        family: Family::Regular,
        catalogue: Catalogue::Polygon,
        tier: Level::One,
    },
    ShapeDefinition {
        name: "rectangle",
        kind: ShapeKind::Rectangle,
        sides: 4,
        groups: &[&[0, 2], &[1, 3]],
        family: Family::Irregular,
        catalogue: Catalogue::Polygon,
        tier: Level::One,
    },
    ShapeDefinition {
        name: "regular hexagon",
        kind: ShapeKind::Regular,
        sides: 6,
        groups: &[&[0, 1, 2, 3, 4, 5]],
        family: Family::Regular,
        catalogue: Catalogue::Polygon,
        tier: Level::One,
    },
    ShapeDefinition {
        name: "isosceles triangle",
        kind: ShapeKind::Isosceles,
        sides: 3,
        groups: &[&[0], &[1, 2]],
        family: Family::Triangle,
        catalogue: Catalogue::Polygon,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "parallelogram",
        kind: ShapeKind::Parallelogram,
        sides: 4,
        groups: &[&[0, 2], &[1, 3]],
        family: Family::Irregular,
        catalogue: Catalogue::Polygon,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "regular pentagon",
        kind: ShapeKind::Regular,
        sides: 5,
        groups: &[&[0, 1, 2, 3, 4]],
        family: Family::Regular,
        catalogue: Catalogue::Polygon,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "regular octagon",
        kind: ShapeKind::Regular,
        sides: 8,
        groups: &[&[0, 1, 2, 3, 4, 5, 6, 7]],
        family: Family::Regular,
        catalogue: Catalogue::Polygon,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "scalene triangle",
        kind: ShapeKind::Scalene,
        sides: 3,
        groups: &[&[0], &[1], &[2]],
        family: Family::Triangle,
        catalogue: Catalogue::Polygon,
        tier: Level::Three,
    },
    ShapeDefinition {
        name: "regular heptagon",
        kind: ShapeKind::Regular,
        sides: 7,
        groups: &[&[0, 1, 2, 3, 4, 5, 6]],
        family: Family::Regular,
        catalogue: Catalogue::Polygon,
        tier: Level::Three,
    },
];

pub static RECTILINEAR: &[ShapeDefinition] = &[
    ShapeDefinition {
        name: "L-shape",
        kind: ShapeKind::Ell,
        sides: 6,
        groups: &[&[0], &[1], &[2], &[3], &[4], &[5]],
        family: Family::Irregular,
        catalogue: Catalogue::Rectilinear,
        tier: Level::One,
    },
    ShapeDefinition {
        name: "uniform staircase",
        kind: ShapeKind::UniformStaircase,
        sides: 8,
        groups: &[&[0], &[1, 3, 5], &[2, 4, 6], &[7]],
        family: Family::Irregular,
        catalogue: Catalogue::Rectilinear,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "notched rectangle",
        kind: ShapeKind::Notch,
        sides: 8,
        groups: &[&[0], &[1, 7], &[2], &[3, 5], &[4], &[6]],
        family: Family::Irregular,
        catalogue: Catalogue::Rectilinear,
        tier: Level::Two,
    },
    ShapeDefinition {
        name: "staircase",
        kind: ShapeKind::Staircase,
        sides: 8,
        groups: &[&[0], &[1], &[2], &[3], &[4], &[5], &[6], &[7]],
        family: Family::Irregular,
        catalogue: Catalogue::Rectilinear,
        tier: Level::Three,
    },
];

pub fn all() -> impl Iterator<Item = &'static ShapeDefinition> {
    POLYGONS.iter().chain(RECTILINEAR.iter())
}

pub fn by_name(name: &str) -> Result<&'static ShapeDefinition, InputError> {
    all()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| InputError::UnknownShape(name.to_string()))
}

/// Check every table entry; a failure here is an authoring bug.
pub fn validate() -> Result<(), CatalogueError> {
    all().try_for_each(|d| d.validate())
}
