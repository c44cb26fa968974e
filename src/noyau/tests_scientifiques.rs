//! Tests scientifiques (campagne) : propriétés observables + limites contrôlées.
//!
//! - propriétés de référence (pourcent, Ans, degrés, domaine, appels refusés, normalisation entière)
//! - cohérence numérique (associativité entière, identités trig à tolérance près)
//! - stress borné (budget temps, tailles bornées)

use std::time::{Duration, Instant};

use rstest::rstest;

use super::erreur::ClasseErreur;
use super::nombre::Nombre::{self, Entier, Reel};
use super::{evaluer, format_affichage, ModeAngle};

const TOL: f64 = 1e-9;

fn eval_ok(expr: &str, ans: impl Into<Nombre>, mode: ModeAngle) -> Nombre {
    evaluer(expr, ans, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_rad(expr: &str) -> f64 {
    eval_ok(expr, 0, ModeAngle::Radians).en_reel()
}

fn eval_deg(expr: &str) -> f64 {
    eval_ok(expr, 0, ModeAngle::Degres).en_reel()
}

fn assert_proche(obtenu: f64, attendu: f64, expr: &str) {
    assert!(
        (obtenu - attendu).abs() < TOL,
        "expr={expr:?} obtenu={obtenu} attendu={attendu}"
    );
}

fn assert_classe(expr: &str, attendue: ClasseErreur) {
    match evaluer(expr, 0, ModeAngle::Radians) {
        Ok(n) => panic!("expr={expr:?} devait échouer ({attendue:?}), a donné {n:?}"),
        Err(e) => assert_eq!(e.classe(), attendue, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_pourcent() {
    assert_eq!(eval_ok("50%", 0, ModeAngle::Radians), Reel(0.5));
}

#[test]
fn sci_ans() {
    assert_eq!(eval_ok("Ans+1", 5, ModeAngle::Radians), Entier(6));
    assert_eq!(eval_ok("-Ans", 5, ModeAngle::Radians), Entier(-5));
    assert_eq!(eval_ok("Ans*2", 1.5, ModeAngle::Radians), Reel(3.0));
    assert_eq!(eval_ok("2^Ans", -1, ModeAngle::Radians), Reel(0.5));
}

#[test]
fn sci_degres_direct_et_inverse() {
    assert_proche(eval_deg("sin(90)"), 1.0, "sin(90)");
    assert_proche(eval_deg("asin(1)"), 90.0, "asin(1)");
    assert_proche(eval_deg("cos(180)"), -1.0, "cos(180)");
    assert_proche(eval_deg("atan(1)"), 45.0, "atan(1)");
}

#[test]
fn sci_radians_par_defaut() {
    assert_proche(eval_rad("sin(pi/2)"), 1.0, "sin(pi/2)");
    assert_proche(eval_rad("asin(1)"), std::f64::consts::FRAC_PI_2, "asin(1)");
}

#[test]
fn sci_mode_sans_effet_hors_trig() {
    for expr in ["sqrt(16)", "log(100, 10)", "abs(-3)", "2**8", "floor(2.7)"] {
        assert_eq!(
            eval_ok(expr, 0, ModeAngle::Radians),
            eval_ok(expr, 0, ModeAngle::Degres),
            "expr={expr:?}"
        );
    }
}

#[test]
fn sci_domaine() {
    assert_classe("sqrt(-1)", ClasseErreur::Math);
    assert_classe("log(0)", ClasseErreur::Math);
    assert_classe("ln(-5)", ClasseErreur::Math);
    assert_classe("1/0", ClasseErreur::Math);
    assert_classe("5 // 0", ClasseErreur::Math);
    assert_classe("5 % 0", ClasseErreur::Math);
    assert_classe("0 ** -1", ClasseErreur::Math);
    assert_classe("(-8) ** (1/3)", ClasseErreur::Math);
    assert_classe("asin(2)", ClasseErreur::Math);
    assert_classe("10.0 ** 400", ClasseErreur::Math);
}

#[test]
fn sci_appel_refuse() {
    // Jamais exécuté : la cible est refusée avant même de regarder l’argument.
    assert_classe("__import__('os')", ClasseErreur::FonctionNonAutorisee);
    assert_classe("eval('1+1')", ClasseErreur::FonctionNonAutorisee);
    assert_classe("exec('x=1')", ClasseErreur::FonctionNonAutorisee);
    assert_classe("open('/etc/passwd')", ClasseErreur::FonctionNonAutorisee);
}

#[test]
fn sci_normalisation_entiere() {
    let r = eval_ok("4/2", 0, ModeAngle::Radians);
    assert_eq!(r.en_reel(), 2.0);
    assert_eq!(r.normalise(), Entier(2));
    assert_eq!(format_affichage(r), "2");

    assert_eq!(format_affichage(eval_ok("7/2", 0, ModeAngle::Radians)), "3.5");
    assert_eq!(
        format_affichage(eval_ok("2**0.5 * 2**0.5", 0, ModeAngle::Radians)),
        "2.0000000000000004"
    );
}

/* ------------------------ Table de calculs usuels ------------------------ */

#[rstest]
#[case("1 + 2 * 3", 7.0)]
#[case("2 ** 3 ** 2", 512.0)]
#[case("-3 ** 2", -9.0)]
#[case("(-3) ** 2", 9.0)]
#[case("-7 // 2", -4.0)]
#[case("-7 % 3", 2.0)]
#[case("7.5 % 2", 1.5)]
#[case("200 * 15%", 30.0)]
#[case("sqrt(2) ** 2", 2.0)]
#[case("log(8, 2)", 3.0)]
#[case("ln(e)", 1.0)]
#[case("log(e ** 3)", 3.0)]
#[case("abs(-2.5)", 2.5)]
#[case("round(2.5)", 2.0)]
#[case("round(1.23456, 2)", 1.23)]
#[case("floor(-0.5)", -1.0)]
#[case("ceil(-0.5)", 0.0)]
#[case("pow(2, 10)", 1024.0)]
#[case("pow(2, 10, 1000)", 24.0)]
#[case("1/(2+3)", 0.2)]
fn sci_table(#[case] expr: &str, #[case] attendu: f64) {
    assert_proche(eval_rad(expr), attendu, expr);
}

/* ------------------------ Identités (à tolérance près) ------------------------ */

#[test]
fn sci_identites_trig() {
    for a in [0.0, 0.3, 1.0, 2.5, -1.7] {
        let expr = format!("sin({a})**2 + cos({a})**2");
        assert_proche(eval_rad(&expr), 1.0, &expr);

        let expr = format!("sin(-{a}) + sin({a})");
        assert_proche(eval_rad(&expr), 0.0, &expr);
    }
    for deg in [0, 30, 45, 60, 90, 135] {
        let expr = format!("sin({deg})**2 + cos({deg})**2");
        assert_proche(eval_deg(&expr), 1.0, &expr);
    }
}

#[test]
fn sci_aller_retour_degres() {
    for deg in [-80, -45, 0, 10, 30, 60, 89] {
        let expr = format!("asin(sin({deg}))");
        assert_proche(eval_deg(&expr), deg as f64, &expr);
    }
}

#[test]
fn sci_entiers_exacts() {
    // 2**62 reste entier exact ; 2**63 déborde i64 => réel
    assert_eq!(eval_ok("2**62", 0, ModeAngle::Radians), Entier(1 << 62));
    assert!(matches!(eval_ok("2**63", 0, ModeAngle::Radians), Reel(_)));
    assert_eq!(
        eval_ok("123456789 * 987654321", 0, ModeAngle::Radians),
        Entier(121_932_631_112_635_269)
    );
}

#[test]
fn sci_entier_hors_i64_affiche_en_reel() {
    // 10**20 déborde i64 : réel, affiché en notation scientifique (pas de précision arbitraire)
    let r = eval_ok("10**20", 0, ModeAngle::Radians);
    assert_eq!(r, Reel(1e20));
    assert_eq!(format_affichage(r), "1e+20");
    assert_eq!(format_affichage(eval_ok("10**18", 0, ModeAngle::Radians)), "1000000000000000000");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..400 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    assert_proche(eval_rad(&expr), 200.0, "somme 400 × 1/2");
}

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(x)**2 alterné, profondeur modérée : doit rester proche de 4
    let mut expr = "4".to_string();
    for k in 0..40 {
        expr = if k % 2 == 0 {
            format!("sqrt({expr})")
        } else {
            format!("({expr})**2")
        };
        budget(t0, max);
    }

    assert_proche(eval_rad(&expr), 4.0, "sqrt/carré alternés");
}

#[test]
fn sci_stress_trop_profond_refuse_proprement() {
    let expr = format!("{}1{}", "sqrt(".repeat(500), ")".repeat(500));
    assert_classe(&expr, ClasseErreur::Syntaxe);

    let expr = vec!["1"; 3000].join("-");
    assert_classe(&expr, ClasseErreur::Syntaxe);
}
