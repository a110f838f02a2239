use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

const DEGENERACY_EPSILON: f64 = 1e-12;

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Bond angle in degrees at vertex `b`.
///
/// Returns `None` if `a` or `c` coincides with `b`.
pub fn bond_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<f64> {
    let ba = a - b;
    let bc = c - b;
    let denom = ba.norm() * bc.norm();
    if denom < DEGENERACY_EPSILON {
        return None;
    }
    let cos_angle = (ba.dot(&bc) / denom).clamp(-1.0, 1.0);
    Some(cos_angle.acos().to_degrees())
}

/// Signed dihedral angle in degrees for the chain `a-b-c-d`.
///
/// The sign follows the IUPAC convention: positive for a clockwise rotation of the
/// front bond `a-b` onto the back bond `c-d` when looking along `b->c`. Returns
/// `None` if either triple of atoms is collinear.
pub fn dihedral(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
) -> Option<f64> {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;
    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let b2_norm = b2.norm();
    if n1.norm() < DEGENERACY_EPSILON || n2.norm() < DEGENERACY_EPSILON {
        return None;
    }
    let x = n1.dot(&n2);
    let y = n1.cross(&n2).dot(&b2) / b2_norm;
    let angle = y.atan2(x).to_degrees();
    // atan2 yields -180 for an antiperiplanar arrangement with a tiny negative y.
    if angle <= -180.0 + 1e-10 {
        Some(180.0)
    } else {
        Some(angle)
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / points.len() as f64))
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}

/// Translates every point so that the point at `anchor` sits at the origin.
pub fn translate_to_anchor(points: &[Point3<f64>], anchor: usize) -> Option<Vec<Point3<f64>>> {
    let origin = points.get(anchor)?.coords;
    Some(points.iter().map(|p| p - origin).collect())
}

/// Kabsch algorithm: the proper rotation that best maps the centred `target` onto
/// the centred `reference` in the least-squares sense.
pub fn kabsch_rotation(
    reference: &[Point3<f64>],
    target: &[Point3<f64>],
) -> Option<Rotation3<f64>> {
    if reference.len() != target.len() || reference.is_empty() {
        return None;
    }
    let ref_centroid = centroid(reference)?;
    let tgt_centroid = centroid(target)?;

    let covariance: Matrix3<f64> = reference
        .iter()
        .zip(target.iter())
        .map(|(r, t)| (t - tgt_centroid) * (r - ref_centroid).transpose())
        .sum();

    let svd = covariance.svd(true, true);
    let u = svd.u?;
    let v = svd.v_t?.transpose();

    let d = (v * u.transpose()).determinant().signum();
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    let rotation = v * correction * u.transpose();

    Some(Rotation3::from_matrix_unchecked(rotation))
}

/// Returns a copy of `target` optimally superposed onto `reference`.
pub fn superpose(reference: &[Point3<f64>], target: &[Point3<f64>]) -> Option<Vec<Point3<f64>>> {
    let rotation = kabsch_rotation(reference, target)?;
    let ref_centroid = centroid(reference)?;
    let tgt_centroid = centroid(target)?;
    Some(
        target
            .iter()
            .map(|p| ref_centroid + rotation * (p - tgt_centroid))
            .collect(),
    )
}

/// Minimum RMSD between two structures after optimal rigid-body superposition.
pub fn aligned_rmsd(reference: &[Point3<f64>], target: &[Point3<f64>]) -> Option<f64> {
    let aligned = superpose(reference, target)?;
    calculate_rmsd(reference, &aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Unit;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    // Front atom projects onto the xy-plane at 45 degrees; b->c runs along +z.
    fn front_three() -> [Point3<f64>; 3] {
        [
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.5),
        ]
    }

    fn asymmetric_molecule() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.0),
            Point3::new(2.0, 1.4, 0.0),
            Point3::new(3.5, 1.5, 0.7),
            Point3::new(-0.6, -0.9, 0.4),
        ]
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(&Point3::new(0.0, 0.0, 0.0), &Point3::new(3.0, 4.0, 0.0));
        assert!(f64_approx_equal(d, 5.0));
    }

    #[test]
    fn bond_angle_of_right_angle_is_ninety_degrees() {
        let angle = bond_angle(
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::origin(),
            &Point3::new(0.0, 2.0, 0.0),
        )
        .unwrap();
        assert!(f64_approx_equal(angle, 90.0));
    }

    #[test]
    fn bond_angle_of_collinear_atoms_is_straight() {
        let angle = bond_angle(
            &Point3::new(-1.0, 0.0, 0.0),
            &Point3::origin(),
            &Point3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!(f64_approx_equal(angle, 180.0));
    }

    #[test]
    fn bond_angle_with_coincident_atoms_is_none() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(bond_angle(&p, &p, &Point3::origin()).is_none());
    }

    #[test]
    fn dihedral_sign_follows_rotation_direction() {
        let [a, b, c] = front_three();
        let d_pos = Point3::new(0.0, 1.0, 1.5);
        let d_neg = Point3::new(1.0, 0.0, 1.5);
        let positive = dihedral(&a, &b, &c, &d_pos).unwrap();
        let negative = dihedral(&a, &b, &c, &d_neg).unwrap();
        assert!(f64_approx_equal(positive, 45.0));
        assert!(f64_approx_equal(negative, -45.0));
    }

    #[test]
    fn dihedral_recovers_constructed_torsions() {
        for expected in [-150.0, -60.0, 0.0, 45.0, 60.0, 120.0] {
            let [a, b, c] = front_three();
            let t = (45.0f64 + expected).to_radians();
            let d = Point3::new(t.cos(), t.sin(), 1.5);
            let value = dihedral(&a, &b, &c, &d).unwrap();
            assert!((value - expected).abs() < 1e-8, "expected {expected}, got {value}");
        }
    }

    #[test]
    fn antiperiplanar_dihedral_is_positive_180() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::origin();
        let c = Point3::new(0.0, 0.0, 1.5);
        let d = Point3::new(-1.0, 0.0, 1.5);
        assert!(f64_approx_equal(dihedral(&a, &b, &c, &d).unwrap(), 180.0));
    }

    #[test]
    fn dihedral_with_collinear_atoms_is_none() {
        let a = Point3::new(0.0, 0.0, -1.0);
        let b = Point3::origin();
        let c = Point3::new(0.0, 0.0, 1.5);
        let d = Point3::new(1.0, 0.0, 1.5);
        assert!(dihedral(&a, &b, &c, &d).is_none());
    }

    #[test]
    fn centroid_of_empty_slice_is_none() {
        assert!(centroid(&[]).is_none());
        let c = centroid(&[Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)]).unwrap();
        assert_eq!(c, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn calculate_rmsd_rejects_mismatched_lengths() {
        let a = [Point3::origin()];
        let b = [Point3::origin(), Point3::origin()];
        assert!(calculate_rmsd(&a, &b).is_none());
        assert!(calculate_rmsd(&[], &[]).is_none());
    }

    #[test]
    fn calculate_rmsd_of_uniform_shift_equals_shift_length() {
        let a = asymmetric_molecule();
        let shift = Vector3::new(0.0, 3.0, 4.0);
        let b: Vec<_> = a.iter().map(|p| p + shift).collect();
        assert!(f64_approx_equal(calculate_rmsd(&a, &b).unwrap(), 5.0));
    }

    #[test]
    fn translate_to_anchor_moves_anchor_to_origin() {
        let moved = translate_to_anchor(&asymmetric_molecule(), 1).unwrap();
        assert_eq!(moved[1], Point3::origin());
        assert_eq!(moved[0], Point3::new(-1.5, 0.0, 0.0));
        assert!(translate_to_anchor(&[], 0).is_none());
    }

    #[test]
    fn aligned_rmsd_is_zero_for_rigid_motion() {
        let reference = asymmetric_molecule();
        let axis = Unit::new_normalize(Vector3::new(0.3, -1.0, 0.5));
        let rotation = Rotation3::from_axis_angle(&axis, 1.1);
        let shift = Vector3::new(-4.0, 2.5, 10.0);
        let moved: Vec<_> = reference.iter().map(|p| rotation * p + shift).collect();

        assert!(calculate_rmsd(&reference, &moved).unwrap() > 1.0);
        assert!(aligned_rmsd(&reference, &moved).unwrap() < 1e-8);
    }

    #[test]
    fn kabsch_never_returns_a_reflection() {
        let reference = asymmetric_molecule();
        let mirrored: Vec<_> = reference
            .iter()
            .map(|p| Point3::new(p.x, p.y, -p.z))
            .collect();
        let rotation = kabsch_rotation(&reference, &mirrored).unwrap();
        assert!(f64_approx_equal(rotation.matrix().determinant(), 1.0));
        assert!(aligned_rmsd(&reference, &mirrored).unwrap() > 1e-3);
    }

    #[test]
    fn aligned_rmsd_never_exceeds_plain_rmsd() {
        let reference = asymmetric_molecule();
        let distorted: Vec<_> = reference
            .iter()
            .enumerate()
            .map(|(i, p)| p + Vector3::new(0.1 * i as f64, -0.05, 0.2))
            .collect();
        let plain = calculate_rmsd(&reference, &distorted).unwrap();
        let aligned = aligned_rmsd(&reference, &distorted).unwrap();
        assert!(aligned <= plain + TOLERANCE);
    }
}
