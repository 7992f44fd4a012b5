//! Golden-output regression tests.
//!
//! The fixtures under `tests/fixtures/` are the recorded reference output
//! of both generators. Rendering must reproduce them byte for byte, which
//! pins every phase convention: the u-channel sign for unequal propagator
//! legs, the inverted RPA glyphs, the `i` on mixed vertices and the `-i` on
//! mixed output legs.

#![allow(clippy::unwrap_used)]

use pffrg_algebra::{Channel, Symmetry};
use pffrg_codegen::render::{render_flow, render_spin};
use pffrg_codegen::{generate_flow, generate_spin, FlowConfig, Phase, SpinConfig};

const FLOW_DEFAULT: &str = include_str!("fixtures/flow_default.txt");
const SPIN_DEFAULT: &str = include_str!("fixtures/spin_default.txt");
const SPIN_EXPANDED: &str = include_str!("fixtures/spin_expanded.txt");
const SPIN_UNRESTRICTED: &str = include_str!("fixtures/spin_unrestricted.txt");
const SPIN_ROTATION_EXPANDED: &str = include_str!("fixtures/spin_rotation_expanded.txt");

const RPA_T00: &str = "double t00i1 =  \
+(+Pt[1][0]-Pt[1][5]-Pt[1][10]-Pt[1][15])*vertexProduct[shift+0] \
+(-Pt[1][1]-Pt[1][4]-Pt[1][11]+Pt[1][14])*vertexProduct[shift+4] \
+(-Pt[1][2]+Pt[1][7]-Pt[1][8]-Pt[1][13])*vertexProduct[shift+8] \
+(-Pt[1][3]-Pt[1][6]+Pt[1][9]-Pt[1][12])*vertexProduct[shift+12] \
+(-Pt[1][1]-Pt[1][4]+Pt[1][11]-Pt[1][14])*vertexProduct[shift+16] \
+(-Pt[1][0]+Pt[1][5]-Pt[1][10]-Pt[1][15])*vertexProduct[shift+20] \
+(+Pt[1][3]+Pt[1][6]+Pt[1][9]-Pt[1][12])*vertexProduct[shift+24] \
+(-Pt[1][2]+Pt[1][7]+Pt[1][8]+Pt[1][13])*vertexProduct[shift+28] \
+(-Pt[1][2]-Pt[1][7]-Pt[1][8]+Pt[1][13])*vertexProduct[shift+32] \
+(-Pt[1][3]+Pt[1][6]+Pt[1][9]+Pt[1][12])*vertexProduct[shift+36] \
+(-Pt[1][0]-Pt[1][5]+Pt[1][10]-Pt[1][15])*vertexProduct[shift+40] \
+(+Pt[1][1]-Pt[1][4]+Pt[1][11]+Pt[1][14])*vertexProduct[shift+44] \
+(-Pt[1][3]+Pt[1][6]-Pt[1][9]-Pt[1][12])*vertexProduct[shift+48] \
+(+Pt[1][2]+Pt[1][7]-Pt[1][8]+Pt[1][13])*vertexProduct[shift+52] \
+(-Pt[1][1]+Pt[1][4]+Pt[1][11]+Pt[1][14])*vertexProduct[shift+56] \
+(-Pt[1][0]-Pt[1][5]-Pt[1][10]+Pt[1][15])*vertexProduct[shift+60];";

/// Asserts equality line by line so a mismatch names its line instead of
/// dumping the whole output.
fn assert_same_text(actual: &str, expected: &str) {
    for (n, (a, e)) in actual.lines().zip(expected.lines()).enumerate() {
        if a != e {
            let at = a.bytes().zip(e.bytes()).take_while(|(x, y)| x == y).count();
            let from = at.saturating_sub(40);
            panic!(
                "line {} differs at byte {at}\n  actual:   ...{}\n  expected: ...{}",
                n + 1,
                a.get(from..(at + 80).min(a.len())).unwrap_or(a),
                e.get(from..(at + 80).min(e.len())).unwrap_or(e),
            );
        }
    }
    assert_eq!(actual.lines().count(), expected.lines().count());
    assert_eq!(actual, expected);
}

fn default_flow_text() -> String {
    render_flow(&generate_flow(&FlowConfig::default()).unwrap())
}

fn spin_text(config: &SpinConfig) -> String {
    render_spin(&generate_spin(config).unwrap())
}

fn line_starting<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.lines().find(|l| l.starts_with(prefix)).unwrap()
}

/// The `addG` line for `(mu, nu)` below a channel header.
fn add_g_line<'a>(text: &'a str, header: &str, mu: usize, nu: usize) -> &'a str {
    let tail = format!(", DG_vec,1,{mu},{nu}, R, ns,nt,nu);");
    text.lines()
        .skip_while(|l| *l != header)
        .skip(1)
        .take_while(|l| !l.is_empty())
        .find(|l| l.ends_with(&tail))
        .unwrap()
}

// =============================================================================
// Flow equation
// =============================================================================

#[test]
fn default_flow_matches_reference() {
    assert_same_text(&default_flow_text(), FLOW_DEFAULT);
}

#[test]
fn u_channel_sign_flips_for_unequal_legs() {
    let text = default_flow_text();
    let line = add_g_line(&text, "Channel no 4: ", 1, 0);
    let equal_legs = "addG(( +( -Ch5A1_00*Ch5A2_10 -Ch5A1_01*Ch5A2_11 -Ch5A1_02*Ch5A2_12 \
        -Ch5A1_03*Ch5A2_13 -Ch5A1_10*Ch5A2_00 -Ch5A1_11*Ch5A2_01 -Ch5A1_12*Ch5A2_02 \
        -Ch5A1_13*Ch5A2_03 -Ch5A1_20*Ch5A2_30 +Ch5A1_21*Ch5A2_31 +Ch5A1_22*Ch5A2_32 \
        +Ch5A1_23*Ch5A2_33 +Ch5A1_30*Ch5A2_20 -Ch5A1_31*Ch5A2_21 -Ch5A1_32*Ch5A2_22 \
        -Ch5A1_33*Ch5A2_23)*Pt00";
    let unequal_legs = "+( +Ch5A1_00*Ch5A2_00 -Ch5A1_01*Ch5A2_01 -Ch5A1_02*Ch5A2_02 \
        -Ch5A1_03*Ch5A2_03 -Ch5A1_10*Ch5A2_10 +Ch5A1_11*Ch5A2_11 +Ch5A1_12*Ch5A2_12 \
        +Ch5A1_13*Ch5A2_13 +Ch5A1_20*Ch5A2_20 -Ch5A1_21*Ch5A2_21 -Ch5A1_22*Ch5A2_22 \
        -Ch5A1_23*Ch5A2_23 +Ch5A1_30*Ch5A2_30 -Ch5A1_31*Ch5A2_31 -Ch5A1_32*Ch5A2_32 \
        -Ch5A1_33*Ch5A2_33)*Pt01";
    let expected = format!("{equal_legs}{unequal_legs}");
    let shown = &line[..expected.len().min(line.len())];
    assert!(line.starts_with(&expected), "{shown}");
}

#[test]
fn rpa_line_carries_inverted_glyphs() {
    let text = default_flow_text();
    let line = line_starting(&text, "double t00i1 = ");
    assert_eq!(line, RPA_T00);
}

#[test]
fn t_channel_line_with_mixed_output_leg() {
    let text = default_flow_text();
    let line = add_g_line(&text, "Channel no 2: ", 0, 1);
    assert!(
        line.starts_with(
            "addG(( 2*t01 +( -Ch3A1_00*Ch3A2_01 -Ch3A1_00*Ch3A2_10 +Ch3A1_00*Ch3A2_23 \
             -Ch3A1_00*Ch3A2_32 -Ch3A1_01*Ch3A2_00 -Ch3A1_01*Ch3A2_11 +Ch3A1_01*Ch3A2_22 \
             +Ch3A1_01*Ch3A2_33 -Ch3A1_02*Ch3A2_03 -Ch3A1_02*Ch3A2_12 -Ch3A1_02*Ch3A2_21 \
             +Ch3A1_02*Ch3A2_30 +Ch3A1_03*Ch3A2_02 -Ch3A1_03*Ch3A2_13 -Ch3A1_03*Ch3A2_20 \
             -Ch3A1_03*Ch3A2_31)*Pt3_00+( -Ch3A1_00*Ch3A2_00 -Ch3A1_00*Ch3A2_11 "
        ),
        "{}",
        &line[..200]
    );
    assert!(line.contains(
        ")*Pt3_33+( -Ch4A1_00*Ch4A2_01 -Ch4A1_11*Ch4A2_01 -Ch4A1_22*Ch4A2_01 \
         -Ch4A1_33*Ch4A2_01 -Ch4A1_10*Ch4A2_11 -Ch4A1_01*Ch4A2_11 -Ch4A1_32*Ch4A2_11 \
         +Ch4A1_23*Ch4A2_11 -Ch4A1_20*Ch4A2_21 +Ch4A1_31*Ch4A2_21 -Ch4A1_02*Ch4A2_21 \
         -Ch4A1_13*Ch4A2_21 -Ch4A1_30*Ch4A2_31 -Ch4A1_21*Ch4A2_31 +Ch4A1_12*Ch4A2_31 \
         -Ch4A1_03*Ch4A2_31)*Pt4_00"
    ));
    assert!(line.ends_with(
        "+Ch4A1_21*Ch4A2_31 -Ch4A1_12*Ch4A2_31 +Ch4A1_03*Ch4A2_31)*Pt4_33)/(2*pi) \
         , DG_vec,1,0,1, R, ns,nt,nu);"
    ));
}

#[test]
fn schwinger_dyson_identity_component() {
    let text = default_flow_text();
    let line = line_starting(&text, "0-component: ");
    assert!(line.starts_with(
        "0-component: BV*(+(+(+(-FV1_11-FV2_11-FV1_22-FV2_22-FV1_33-FV2_33)*PrC_0\
         +(+FV1_10+FV2_10+FV1_23+FV2_23-FV1_32-FV2_32)*PrC_1\
         +(-FV1_13-FV2_13+FV1_20+FV2_20+FV1_31+FV2_31)*PrC_2\
         +(+FV1_12+FV2_12-FV1_21-FV2_21+FV1_30+FV2_30)*PrC_3)*PrB_0\
         +(+(+FV2_01+FV1_10-FV1_23-FV2_32+FV2_23+FV1_32)*PrC_0\
         +(+FV2_00+FV1_11-FV1_22+FV2_33+FV2_22-FV1_33)*PrC_1"
    ));
    assert_eq!(line, line_starting(FLOW_DEFAULT, "0-component: "));
}

#[test]
fn reference_coefficients_are_real() {
    let output = generate_flow(&FlowConfig::default()).unwrap();
    let exprs = output
        .s
        .iter()
        .chain(&output.t_left)
        .chain(&output.t_right)
        .chain(&output.u)
        .chain(&output.schwinger_dyson);
    let rpa = output
        .rpa
        .iter()
        .flat_map(|sum| sum.parts.iter())
        .flat_map(|p| &p.terms);
    for term in exprs.flat_map(|e| e.terms()).chain(rpa) {
        assert!(
            matches!(term.phase, Phase::PlusOne | Phase::MinusOne),
            "{:?} at {:?}",
            term.phase,
            term.tuple
        );
    }
}

// =============================================================================
// Spin correlation
// =============================================================================

#[test]
fn default_spin_matches_reference() {
    let text = spin_text(&SpinConfig::default());
    assert_eq!(
        text,
        "First terms(includes summation over lattice sites): \n\
         (+ga0*(+gb2_0*(+ga2_0*(+gb0*(+G21)))))\n\
         Second terms: \n\
         (+ga0*(+gb2_0*(+ga2_0*(+gb0*(+G03+G12+G21-G30)))))\n\
         Terms quadratic in propagators: \n\
         \n"
    );
    assert_eq!(text, SPIN_DEFAULT);
}

#[test]
fn expanded_spin_matches_reference() {
    let config = SpinConfig {
        simplified: false,
        ..SpinConfig::default()
    };
    assert_same_text(&spin_text(&config), SPIN_EXPANDED);
}

#[test]
fn unrestricted_spin_matches_reference() {
    let config = SpinConfig {
        symmetry: Symmetry::NONE,
        ..SpinConfig::default()
    };
    let output = generate_spin(&config).unwrap();
    assert!(output.report.count(Channel::SpinQuadratic) > 0);
    assert_same_text(&render_spin(&output), SPIN_UNRESTRICTED);
}

#[test]
fn rotation_expanded_spin_matches_reference() {
    let config = SpinConfig {
        symmetry: Symmetry {
            reduced_rotation: true,
            time_reversal: false,
        },
        simplified: false,
        ..SpinConfig::default()
    };
    assert_same_text(&spin_text(&config), SPIN_ROTATION_EXPANDED);
}
