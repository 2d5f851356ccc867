use serde::{Deserialize, Serialize};

use crate::core::hierarchy::{Hierarchy, NodeId};
use crate::core::types::{ensure_non_negative, ensure_positive};
use crate::error::{ChartError, ChartResult};

/// Circle geometry produced by [`PackLayout`].
///
/// Coordinates are relative to the layout's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PackedCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl PackedCircle {
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
}

/// Circle-packing layout: leaves sized by `sqrt(value)`, siblings packed
/// around their parent and the whole tree scaled to fit `width × height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl PackLayout {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            padding: 0.0,
        }
    }

    #[must_use]
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_positive(self.width, "pack width")?;
        ensure_positive(self.height, "pack height")?;
        ensure_non_negative(self.padding, "pack padding")
    }

    /// Returns one circle per hierarchy node, indexed by [`NodeId`].
    pub fn layout(self, hierarchy: &Hierarchy) -> ChartResult<Vec<PackedCircle>> {
        self.validate()?;
        let root = hierarchy.root();
        if hierarchy.entry(root).value <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle packing requires a positive total value".to_owned(),
            ));
        }

        let mut circles = vec![PackedCircle::default(); hierarchy.len()];
        for (id, entry) in hierarchy.entries().iter().enumerate() {
            if entry.is_leaf() {
                circles[id].r = entry.value.max(0.0).sqrt();
            }
        }

        let mut random = Lcg::default();
        let post_order = hierarchy.post_order();
        for &id in &post_order {
            pack_children(hierarchy, &mut circles, id, 0.0, &mut random)?;
        }

        let extent = self.width.min(self.height);
        let padding = self.padding * circles[root].r / extent;
        for &id in &post_order {
            pack_children(hierarchy, &mut circles, id, padding, &mut random)?;
        }

        let k = extent / (2.0 * circles[root].r);
        circles[root] = PackedCircle::new(self.width / 2.0, self.height / 2.0, circles[root].r * k);
        for id in hierarchy.pre_order().into_iter().skip(1) {
            let Some(parent) = hierarchy.entry(id).parent else {
                continue;
            };
            let origin = circles[parent];
            let circle = &mut circles[id];
            circle.r *= k;
            circle.x = origin.x + k * circle.x;
            circle.y = origin.y + k * circle.y;
        }

        Ok(circles)
    }
}

fn pack_children(
    hierarchy: &Hierarchy,
    circles: &mut [PackedCircle],
    id: NodeId,
    padding: f64,
    random: &mut Lcg,
) -> ChartResult<()> {
    let children = &hierarchy.entry(id).children;
    if children.is_empty() {
        return Ok(());
    }

    let mut siblings: Vec<PackedCircle> = children
        .iter()
        .map(|&child| {
            let mut circle = circles[child];
            circle.r += padding;
            circle
        })
        .collect();
    let enclosing_radius = pack_siblings(&mut siblings, random)?;

    for (&child, packed) in children.iter().zip(siblings) {
        circles[child] = PackedCircle::new(packed.x, packed.y, packed.r - padding);
    }
    circles[id].r = enclosing_radius + padding;
    Ok(())
}

/// Packs `circles` tangent to each other around the origin and returns the
/// radius of their enclosing circle.
///
/// Placement walks a front chain (a ring of the outermost circles kept as
/// index links) and always tries to attach the next circle to the pair
/// closest to the centroid.
pub fn pack_siblings(circles: &mut [PackedCircle], random: &mut Lcg) -> ChartResult<f64> {
    let n = circles.len();
    if n == 0 {
        return Ok(0.0);
    }

    circles[0].x = 0.0;
    circles[0].y = 0.0;
    if n == 1 {
        return Ok(circles[0].r);
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    circles[1].y = 0.0;
    if n == 2 {
        return Ok(circles[0].r + circles[1].r);
    }

    let (first, second) = (circles[0], circles[1]);
    place(second, first, &mut circles[2]);

    let mut next = vec![0usize; n];
    let mut previous = vec![0usize; n];
    next[0] = 1;
    previous[2] = 1;
    next[1] = 2;
    previous[0] = 2;
    next[2] = 0;
    previous[1] = 0;

    let (mut a, mut b) = (0usize, 1usize);
    let mut i = 3;
    'pack: while i < n {
        let (anchor_a, anchor_b) = (circles[a], circles[b]);
        place(anchor_a, anchor_b, &mut circles[i]);
        let c = i;

        // Closest intersecting circle on the chain, measured by arc length.
        let (mut j, mut k) = (next[b], previous[a]);
        let (mut sj, mut sk) = (circles[b].r, circles[a].r);
        loop {
            if sj <= sk {
                if intersects(circles[j], circles[c]) {
                    b = j;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                sj += circles[j].r;
                j = next[j];
            } else {
                if intersects(circles[k], circles[c]) {
                    a = k;
                    next[a] = b;
                    previous[b] = a;
                    continue 'pack;
                }
                sk += circles[k].r;
                k = previous[k];
            }
            if j == next[k] {
                break;
            }
        }

        previous[c] = a;
        next[c] = b;
        next[a] = c;
        previous[b] = c;
        b = c;

        let mut best = score(circles, &next, a);
        let mut cursor = next[c];
        while cursor != b {
            let candidate = score(circles, &next, cursor);
            if candidate < best {
                a = cursor;
                best = candidate;
            }
            cursor = next[cursor];
        }
        b = next[a];
        i += 1;
    }

    let mut chain = vec![circles[b]];
    let mut cursor = next[b];
    while cursor != b {
        chain.push(circles[cursor]);
        cursor = next[cursor];
    }
    let enclosing = enclose(&chain, random)?;

    for circle in circles.iter_mut() {
        circle.x -= enclosing.x;
        circle.y -= enclosing.y;
    }
    Ok(enclosing.r)
}

/// Smallest circle enclosing every input circle.
pub fn enclose(circles: &[PackedCircle], random: &mut Lcg) -> ChartResult<PackedCircle> {
    let mut shuffled = circles.to_vec();
    random.shuffle(&mut shuffled);

    let mut basis: Vec<PackedCircle> = Vec::with_capacity(3);
    let mut enclosing: Option<PackedCircle> = None;
    let mut i = 0;
    while i < shuffled.len() {
        let circle = shuffled[i];
        match enclosing {
            Some(current) if encloses_weak(current, circle) => i += 1,
            _ => {
                basis = extend_basis(&basis, circle)?;
                enclosing = Some(enclose_basis(&basis));
                i = 0;
            }
        }
    }

    enclosing.ok_or_else(|| ChartError::InvalidData("cannot enclose zero circles".to_owned()))
}

fn place(b: PackedCircle, a: PackedCircle, c: &mut PackedCircle) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let d2 = dx * dx + dy * dy;
    if d2 == 0.0 {
        c.x = a.x + c.r;
        c.y = a.y;
        return;
    }

    let a2 = (a.r + c.r).powi(2);
    let b2 = (b.r + c.r).powi(2);
    if a2 > b2 {
        let x = (d2 + b2 - a2) / (2.0 * d2);
        let y = (b2 / d2 - x * x).max(0.0).sqrt();
        c.x = b.x - x * dx - y * dy;
        c.y = b.y - x * dy + y * dx;
    } else {
        let x = (d2 + a2 - b2) / (2.0 * d2);
        let y = (a2 / d2 - x * x).max(0.0).sqrt();
        c.x = a.x + x * dx - y * dy;
        c.y = a.y + x * dy + y * dx;
    }
}

fn intersects(a: PackedCircle, b: PackedCircle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn score(circles: &[PackedCircle], next: &[usize], node: usize) -> f64 {
    let a = circles[node];
    let b = circles[next[node]];
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

fn extend_basis(basis: &[PackedCircle], p: PackedCircle) -> ChartResult<Vec<PackedCircle>> {
    if encloses_weak_all(p, basis) {
        return Ok(vec![p]);
    }

    for &b in basis {
        if encloses_not(p, b) && encloses_weak_all(enclose_basis2(b, p), basis) {
            return Ok(vec![b, p]);
        }
    }

    for (i, &bi) in basis.iter().enumerate() {
        for &bj in &basis[i + 1..] {
            if encloses_not(enclose_basis2(bi, bj), p)
                && encloses_not(enclose_basis2(bi, p), bj)
                && encloses_not(enclose_basis2(bj, p), bi)
                && encloses_weak_all(enclose_basis3(bi, bj, p), basis)
            {
                return Ok(vec![bi, bj, p]);
            }
        }
    }

    Err(ChartError::InvalidData(
        "no enclosing basis found for packed circles".to_owned(),
    ))
}

fn encloses_not(a: PackedCircle, b: PackedCircle) -> bool {
    let dr = a.r - b.r;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr < 0.0 || dr * dr < dx * dx + dy * dy
}

fn encloses_weak(a: PackedCircle, b: PackedCircle) -> bool {
    let dr = a.r - b.r + a.r.max(b.r).max(1.0) * 1e-9;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

fn encloses_weak_all(a: PackedCircle, basis: &[PackedCircle]) -> bool {
    basis.iter().all(|&b| encloses_weak(a, b))
}

fn enclose_basis(basis: &[PackedCircle]) -> PackedCircle {
    match basis {
        [a] => *a,
        [a, b] => enclose_basis2(*a, *b),
        [a, b, c] => enclose_basis3(*a, *b, *c),
        _ => PackedCircle::default(),
    }
}

fn enclose_basis2(a: PackedCircle, b: PackedCircle) -> PackedCircle {
    let x21 = b.x - a.x;
    let y21 = b.y - a.y;
    let r21 = b.r - a.r;
    let l = (x21 * x21 + y21 * y21).sqrt();
    PackedCircle::new(
        (a.x + b.x + x21 / l * r21) / 2.0,
        (a.y + b.y + y21 / l * r21) / 2.0,
        (l + a.r + b.r) / 2.0,
    )
}

fn enclose_basis3(a: PackedCircle, b: PackedCircle, c: PackedCircle) -> PackedCircle {
    let (x1, y1, r1) = (a.x, a.y, a.r);
    let a2 = x1 - b.x;
    let a3 = x1 - c.x;
    let b2 = y1 - b.y;
    let b3 = y1 - c.y;
    let c2 = b.r - r1;
    let c3 = c.r - r1;
    let d1 = x1 * x1 + y1 * y1 - r1 * r1;
    let d2 = d1 - b.x * b.x - b.y * b.y + b.r * b.r;
    let d3 = d1 - c.x * c.x - c.y * c.y + c.r * c.r;
    let ab = a3 * b2 - a2 * b3;
    let xa = (b2 * d3 - b3 * d2) / (ab * 2.0) - x1;
    let xb = (b3 * c2 - b2 * c3) / ab;
    let ya = (a3 * d2 - a2 * d3) / (ab * 2.0) - y1;
    let yb = (a2 * c3 - a3 * c2) / ab;
    let qa = xb * xb + yb * yb - 1.0;
    let qb = 2.0 * (r1 + xa * xb + ya * yb);
    let qc = xa * xa + ya * ya - r1 * r1;
    let r = -(if qa.abs() > 1e-6 {
        (qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa)
    } else {
        qc / qb
    });
    PackedCircle::new(x1 + xa + xb * r, y1 + ya + yb * r, r)
}

/// Deterministic linear congruential generator used to shuffle enclosing
/// candidates, so identical input always packs identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Default for Lcg {
    fn default() -> Self {
        Self { state: 1 }
    }
}

impl Lcg {
    const MULTIPLIER: u64 = 1_664_525;
    const INCREMENT: u64 = 1_013_904_223;
    const MODULUS: u64 = 1 << 32;

    /// Next value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = (Self::MULTIPLIER * self.state + Self::INCREMENT) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut remaining = items.len();
        while remaining > 0 {
            let index = (self.next_unit() * remaining as f64) as usize;
            remaining -= 1;
            items.swap(remaining, index);
        }
    }
}
