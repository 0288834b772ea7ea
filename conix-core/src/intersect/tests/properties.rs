use std::ops::Range;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::super::*;
use crate::{circle::Circle, ellipse::Ellipse, parabola::Parabola, shape::Shape};
use test_log::test;

const SAMPLES: usize = 200;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0xC0_1C)
}

fn random_point(rng: &mut StdRng, extent: f64) -> R2<f64> {
    R2::new(rng.gen_range(-extent..extent), rng.gen_range(-extent..extent))
}

fn random_unit(rng: &mut StdRng) -> R2<f64> {
    let theta: f64 = rng.gen_range(0. ..std::f64::consts::TAU);
    R2::new(theta.cos(), theta.sin())
}

fn circle_within(rng: &mut StdRng, extent: f64, radii: Range<f64>) -> Circle {
    let c = random_point(rng, extent);
    Circle::new(c, rng.gen_range(radii)).unwrap()
}

fn random_circle(rng: &mut StdRng) -> Circle {
    circle_within(rng, 3., 0.5..3.)
}

fn far_circle(rng: &mut StdRng) -> Circle {
    circle_within(rng, 1e3, 10. ..1e3)
}

/// Small circles near the origin, and large ones up to a thousand units out.
const CIRCLES: [fn(&mut StdRng) -> Circle; 2] = [random_circle, far_circle];

fn random_ellipse(rng: &mut StdRng) -> Ellipse {
    let c = random_point(rng, 3.);
    let a = rng.gen_range(0.5..3.);
    let b = rng.gen_range(0.5..3.);
    Ellipse::new(c, a, b, rng.gen_range(0. ..std::f64::consts::PI)).unwrap()
}

/// A point on `p`, and the unit normal there pointing away from the focus side.
fn parabola_sample(p: &Parabola, s: f64) -> (R2<f64>, R2<f64>) {
    let vertex = p.vertex();
    let axis = (p.focus - vertex).normalize();
    let f = p.focus.distance(&vertex);
    let along = p.directrix.direction;
    let point = vertex + along * s + axis * (s * s / (4. * f));
    let outward = (along * (s / (2. * f)) - axis).normalize();
    (point, outward)
}

#[test]
fn circle_pairs_meet_at_most_twice() {
    let tol = Tolerance::default();
    let mut rng = rng();
    for sample in CIRCLES {
        let mut met = 0;
        for _ in 0..SAMPLES {
            let (a, b) = (sample(&mut rng), sample(&mut rng));
            let points = a.intersect_with_curve(&b, tol).unwrap();
            assert!(points.len() <= 2, "{} ∩ {}: {:?}", a, b, points);
            for p in &points {
                assert!(a.is_point_on(p, tol) && b.is_point_on(p, tol), "{} ∩ {}: {}", a, b, p);
            }
            assert_eq!(Shape::from(a).intersect(&Shape::from(b), tol).unwrap(), points);
            if points.len() == 2 {
                met += 1;
            }
        }
        assert!(met > 0);
    }
}

#[test]
fn diameters_cross_twice_about_the_center() {
    let tol = Tolerance::default();
    let mut rng = rng();
    for sample in CIRCLES {
        for _ in 0..SAMPLES {
            let circle = sample(&mut rng);
            let line = InfiniteLine::new(circle.c, random_unit(&mut rng)).unwrap();
            let points = circle.intersect_with_line(&line, tol);
            assert_eq!(points.len(), 2, "{} ∩ {}: {:?}", circle, line, points);
            let mid = (points[0] + points[1]) / 2.;
            assert_relative_eq!(mid, circle.c, epsilon = 1e-9);
            assert_relative_eq!(points[0].distance(&points[1]), 2. * circle.r, epsilon = 1e-9);
            let shapes = Shape::from(circle).intersect(&Shape::from(line), tol).unwrap();
            assert_eq!(shapes, points);
        }
    }
}

#[test]
fn tangents_touch_once() {
    let tol = Tolerance::default();
    let mut rng = rng();
    for sample in CIRCLES {
        for _ in 0..SAMPLES {
            let circle = sample(&mut rng);
            let u = random_unit(&mut rng);
            let touch = circle.c + u * circle.r;
            let tangent = InfiniteLine::new(touch, R2::new(-u.y, u.x)).unwrap();
            let points = circle.intersect_with_line(&tangent, tol);
            assert_eq!(points.len(), 1, "{} ∩ {}: {:?}", circle, tangent, points);
            assert_relative_eq!(points[0], touch, epsilon = 1e-9);
            assert_eq!(Shape::from(tangent).intersect(&Shape::from(circle), tol).unwrap(), points);
        }
    }
}

fn assert_membership_agrees<C: ToConic + PointMembership>(curve: &C, on: R2<f64>, outward: R2<f64>, offset: f64) {
    let tol = Tolerance::default();
    let conic = curve.to_conic();
    assert!(curve.is_point_on(&on, tol), "{:?} should contain {}", on, on);
    assert!(conic.is_point_on(&on, Tolerance::new(1e-8)), "{} should contain {}", conic, on);
    let off = on + outward * offset;
    assert!(!curve.is_point_on(&off, tol), "{} is off the curve", off);
    assert!(!conic.is_point_on(&off, tol), "{} is off {}", off, conic);
}

#[test]
fn native_and_conic_membership_agree() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let circle = random_circle(&mut rng);
        let u = random_unit(&mut rng);
        let offset = rng.gen_range(0.01..1.);
        assert_membership_agrees(&circle, circle.c + u * circle.r, u, offset);

        let ellipse = random_ellipse(&mut rng);
        let theta: f64 = rng.gen_range(0. ..std::f64::consts::TAU);
        let (sin, cos) = theta.sin_cos();
        let outward = R2::new(cos / ellipse.a, sin / ellipse.b).normalize().rotate(ellipse.t);
        let offset = rng.gen_range(0.01..1.);
        assert_membership_agrees(&ellipse, ellipse.point_at(theta), outward, offset);

        let directrix = InfiniteLine::new(random_point(&mut rng, 2.), random_unit(&mut rng)).unwrap();
        let side = if rng.gen_bool(0.5) { 1. } else { -1. };
        let focus = directrix.point + directrix.normal() * (side * rng.gen_range(0.5..2.));
        let parabola = Parabola::new(focus, directrix).unwrap();
        let (on, outward) = parabola_sample(&parabola, rng.gen_range(-3. ..3.));
        let offset = rng.gen_range(0.01..1.);
        assert_membership_agrees(&parabola, on, outward, offset);
    }
}

#[test]
fn select_distinct_is_idempotent() {
    let tol = Tolerance::default();
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let base: Vec<R2<f64>> = (0..4).map(|_| random_point(&mut rng, 1.)).collect();
        let points: Vec<R2<f64>> = (0..10)
            .map(|_| {
                let p = base[rng.gen_range(0..base.len())];
                p + R2::new(rng.gen_range(-1e-12..1e-12), rng.gen_range(-1e-12..1e-12))
            })
            .collect();
        let once = tol.select_distinct(points);
        assert!(once.len() <= base.len());
        assert_eq!(tol.select_distinct(once.clone()), once);
    }
}

#[test]
fn ellipse_points_are_their_own_closest() {
    let mut rng = rng();
    for _ in 0..SAMPLES {
        let ellipse = random_ellipse(&mut rng);
        let p = ellipse.point_at(rng.gen_range(0. ..std::f64::consts::TAU));
        assert_relative_eq!(ellipse.closest_point_to_point(&p), p, epsilon = 1e-9);
    }
}
