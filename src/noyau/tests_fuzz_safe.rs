//! Tests fuzz safe : robustesse + déterminisme + fermeture de la liste blanche.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe) pour les expressions bien formées
//! - proptest pour les chaînes arbitraires / hostiles
//! - invariant clé : Ok(n) => n fini ; sinon une erreur classée (jamais de panique)

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::erreur::ClasseErreur;
use super::nombre::Nombre;
use super::{evaluer, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choisir<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.pick(options.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => format!("{}", rng.pick(10)),
        1 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        2 => format!("{}%", rng.pick(200)),
        3 => rng.choisir(&["pi", "π", "e"]).to_string(),
        4 => "Ans".to_string(),
        _ => format!("-{}", rng.pick(5)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = rng.choisir(&["+", "-", "*", "/", "//", " % ", "^", "×", "÷"]);
            format!(
                "({}{op}{})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        3 => {
            let f = rng.choisir(&[
                "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "log", "ln", "abs", "round",
                "floor", "ceil",
            ]);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        4 => {
            let f = rng.choisir(&["log", "pow", "round"]);
            format!(
                "{f}({}, {})",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        _ => format!("-({})", gen_expr(rng, depth - 1)),
    }
}

/// Contrat de sûreté : succès fini, ou erreur classée non vide.
fn check_contrat(expr: &str, r: &Result<Nombre, super::ErreurEval>) {
    match r {
        Ok(n) => assert!(n.est_fini(), "résultat non fini: expr={expr:?} n={n:?}"),
        Err(e) => assert!(!e.to_string().is_empty(), "erreur muette: expr={expr:?}"),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_contrat() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        };

        let r1 = evaluer(&expr, 7, mode);
        let r2 = evaluer(&expr, 7, mode);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        check_contrat(&expr, &r1);
        match r1 {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                // Les expressions générées sont bien formées : seules les erreurs
                // de calcul / d’arguments sont attendues ici.
                assert!(
                    matches!(e.classe(), ClasseErreur::Math | ClasseErreur::Arguments),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_injections_refusees() {
    // Tentatives d’accès au-delà de la liste blanche : toutes doivent échouer.
    let hostiles = [
        "__import__('os').system('ls')",
        "__import__('os')",
        "().__class__.__bases__[0].__subclasses__()",
        "sin.__globals__",
        "getattr(sin, '__call__')(0)",
        "globals()",
        "locals()",
        "[x for x in (1,2)]",
        "lambda: 1",
        "x := 1",
        "a = 1",
        "import os",
        "1; 2",
        "sin(0)(0)",
        "(lambda x: x)(1)",
        "eval",
        "abs.__self__",
        "print(1)",
        "'a' * 3",
        "b'abc'",
        "{}",
        "[1, 2]",
        "1 if 1 else 0",
        "not 1",
        "1 and 2",
        "1 < 2",
        "True",
        "None",
        "pi()",
        "Sin(0)",
    ];

    for expr in hostiles {
        let r = evaluer(expr, 0, ModeAngle::Radians);
        assert!(r.is_err(), "aurait dû échouer: expr={expr:?} r={r:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    fn somme_balancee(terme: &str, n: usize) -> String {
        let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
        while items.len() > 1 {
            items = items
                .chunks(2)
                .map(|c| match c {
                    [a, b] => format!("({a}+{b})"),
                    [a] => a.clone(),
                    _ => String::new(),
                })
                .collect();
        }
        items.pop().unwrap_or_else(|| "0".to_string())
    }

    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    let n = evaluer(&expr, 0, ModeAngle::Radians).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(n.normalise(), Nombre::Entier(400));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Chaîne arbitraire : jamais de panique, succès fini ou erreur classée.
    #[test]
    fn prop_chaine_arbitraire(s in ".{0,64}") {
        let r = evaluer(&s, 0, ModeAngle::Radians);
        check_contrat(&s, &r);
    }

    /// Alphabet restreint aux caractères du langage : couvre mieux la grammaire.
    #[test]
    fn prop_alphabet_calculatrice(s in "[0-9a-z_().,+*/%^×÷π '-]{0,48}") {
        let r1 = evaluer(&s, 3, ModeAngle::Degres);
        let r2 = evaluer(&s, 3, ModeAngle::Degres);
        prop_assert_eq!(&r1, &r2);
        check_contrat(&s, &r1);
    }

    /// Tout nom hors liste blanche appelé comme fonction est refusé, quels que soient ses arguments.
    #[test]
    fn prop_appel_hors_liste_refuse(
        nom in "[a-zA-Z_][a-zA-Z0-9_]{0,12}",
        arg in "[0-9'a-z(), ]{0,12}",
    ) {
        let autorises = [
            "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "log", "ln", "abs", "round",
            "floor", "ceil", "pow", "pi", "e", "Ans",
        ];
        prop_assume!(!autorises.contains(&nom.as_str()) && !nom.contains("Ans"));

        let expr = format!("{nom}({arg})");
        let r = evaluer(&expr, 0, ModeAngle::Radians);
        prop_assert!(r.is_err(), "expr={:?} r={:?}", expr, r);
        let classe = r.unwrap_err().classe();
        prop_assert!(
            matches!(classe, ClasseErreur::FonctionNonAutorisee | ClasseErreur::Syntaxe),
            "expr={:?} classe={:?}", expr, classe
        );
    }

    /// Pourcent littéral : n% == n/100.
    #[test]
    fn prop_pourcent(n in 0u32..100_000) {
        let r = evaluer(&format!("{n}%"), 0, ModeAngle::Radians).unwrap();
        prop_assert!((r.en_reel() - n as f64 / 100.0).abs() < 1e-9);
    }
}
