//! Noyau — évaluation (pipeline réel)
//!
//! normalise -> jetons -> AST (liste blanche syntaxique) -> évaluation récursive
//!        (liste blanche à chaque nœud) -> contrôle final (nombre fini)
//!
//! Sans état : le contexte (Ans + mode d’angle) arrive par valeur à chaque appel.

use tracing::debug;

use super::analyse::analyser;
use super::arbre::{Constante, Noeud, OpBinaire, OpUnaire};
use super::erreur::{ErreurEval, ResultatEval};
use super::fonctions::{constante, Fonction, ModeAngle};
use super::format::format_nombre;
use super::jetons::{format_tokens, tokenize};
use super::nombre::Nombre;
use super::normalise::normaliser;

/// Garde-fou : longueur maximale d’entrée (en caractères).
const LONGUEUR_MAX: usize = 10_000;

/// Contexte fourni par l’appelant (jamais modifié ici).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contexte {
    pub ans: Nombre,
    pub mode: ModeAngle,
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub normalisee: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Valeur intermédiaire : un nom de fonction nu s’évalue en fonction,
/// utilisable seulement comme cible d’appel.
#[derive(Clone, Copy, Debug)]
enum Valeur {
    Nombre(Nombre),
    Fonction(Fonction),
}

/// API publique : évalue `expression` avec la valeur précédente `ans` et le mode d’angle.
pub fn evaluer(expression: &str, ans: impl Into<Nombre>, mode: ModeAngle) -> ResultatEval<Nombre> {
    let ctx = Contexte {
        ans: ans.into(),
        mode,
    };
    evaluer_avec_demarche(expression, ctx).map(|(n, _)| n)
}

/// Comme `evaluer`, et retourne aussi les formes intermédiaires (panneau "Démarche").
pub fn evaluer_avec_demarche(
    expression: &str,
    ctx: Contexte,
) -> ResultatEval<(Nombre, DemarcheNoyau)> {
    let resultat = pipeline(expression, ctx);
    match &resultat {
        Ok((n, d)) => debug!(
            expression,
            normalisee = %d.normalisee,
            resultat = %format_nombre(*n),
            "évaluation réussie"
        ),
        Err(e) => debug!(expression, classe = ?e.classe(), erreur = %e, "évaluation refusée"),
    }
    resultat
}

fn pipeline(expression: &str, ctx: Contexte) -> ResultatEval<(Nombre, DemarcheNoyau)> {
    if expression.chars().count() > LONGUEUR_MAX {
        return Err(ErreurEval::syntaxe("expression trop longue"));
    }

    // 1) Normalisation textuelle
    let normalisee = normaliser(expression, ctx.ans);
    if normalisee.is_empty() {
        return Err(ErreurEval::Vide);
    }

    // 2) Jetons
    let jetons = tokenize(&normalisee)?;

    // 3) AST
    let arbre = analyser(&jetons)?;

    // 4) Évaluation + contrôle final
    let valeur = evaluer_noeud(&arbre, ctx)?;
    let nombre = nombre_final(valeur)?;

    let d = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn: arbre.format_postfixe(),
        arbre: arbre.to_string(),
        normalisee,
    };

    Ok((nombre, d))
}

/// Le résultat doit être un nombre fini.
fn nombre_final(v: Valeur) -> ResultatEval<Nombre> {
    let n = exiger_nombre(v)?;
    if !n.est_fini() {
        return Err(ErreurEval::math(format!(
            "résultat non fini ({})",
            format_nombre(n)
        )));
    }
    Ok(n)
}

fn exiger_nombre(v: Valeur) -> ResultatEval<Nombre> {
    match v {
        Valeur::Nombre(n) => Ok(n),
        Valeur::Fonction(f) => Err(ErreurEval::ResultatNonNumerique(format!(
            "la fonction {} n’est pas un nombre",
            f.nom()
        ))),
    }
}

fn evaluer_nombre(noeud: &Noeud, ctx: Contexte) -> ResultatEval<Nombre> {
    exiger_nombre(evaluer_noeud(noeud, ctx)?)
}

/* ------------------------ Tables d’opérateurs ------------------------ */

type OpUnaireFn = fn(Nombre) -> Nombre;
type OpBinaireFn = fn(Nombre, Nombre) -> ResultatEval<Nombre>;

fn operation_unaire(op: OpUnaire) -> ResultatEval<OpUnaireFn> {
    match op {
        OpUnaire::Neg => Ok(|x| -x),
        OpUnaire::Pos => Ok(|x| x),
        OpUnaire::Inversion => Err(ErreurEval::OperateurNonSupporte(format!(
            "{} (unaire)",
            op.symbole()
        ))),
    }
}

fn operation_binaire(op: OpBinaire) -> ResultatEval<OpBinaireFn> {
    match op {
        OpBinaire::Add => Ok(|a, b| Ok(a + b)),
        OpBinaire::Sub => Ok(|a, b| Ok(a - b)),
        OpBinaire::Mul => Ok(|a, b| Ok(a * b)),
        OpBinaire::Div => Ok(Nombre::div),
        OpBinaire::DivEntiere => Ok(Nombre::div_entiere),
        OpBinaire::Modulo => Ok(Nombre::modulo),
        OpBinaire::Puissance => Ok(Nombre::puissance),
        OpBinaire::MatMul
        | OpBinaire::DecalageGauche
        | OpBinaire::DecalageDroite
        | OpBinaire::EtBit
        | OpBinaire::OuBit => Err(ErreurEval::OperateurNonSupporte(op.symbole().to_string())),
    }
}

/* ------------------------ Parcours ------------------------ */

/// L’opérateur / la cible est contrôlé AVANT de descendre dans les opérandes.
fn evaluer_noeud(noeud: &Noeud, ctx: Contexte) -> ResultatEval<Valeur> {
    match noeud {
        Noeud::Litteral(c) => match c {
            Constante::Nombre(n) => Ok(Valeur::Nombre(*n)),
            Constante::Texte(s) => Err(ErreurEval::ConstanteNonSupportee(format!("'{s}'"))),
            Constante::Imaginaire(x) => {
                Err(ErreurEval::ConstanteNonSupportee(format!("{x}j (complexe)")))
            }
        },

        Noeud::Identifiant(nom) => {
            if let Some(n) = constante(nom) {
                return Ok(Valeur::Nombre(n));
            }
            Fonction::depuis_nom(nom)
                .map(Valeur::Fonction)
                .ok_or_else(|| ErreurEval::IdentifiantInconnu(nom.clone()))
        }

        Noeud::Unaire(op, x) => {
            let f = operation_unaire(*op)?;
            Ok(Valeur::Nombre(f(evaluer_nombre(x, ctx)?)))
        }

        Noeud::Binaire(op, a, b) => {
            let f = operation_binaire(*op)?;
            let a = evaluer_nombre(a, ctx)?;
            let b = evaluer_nombre(b, ctx)?;
            f(a, b).map(Valeur::Nombre)
        }

        Noeud::Appel(cible, args) => {
            let fonction = match cible.as_ref() {
                Noeud::Identifiant(nom) => Fonction::depuis_nom(nom)
                    .ok_or_else(|| ErreurEval::FonctionNonAutorisee(nom.clone()))?,
                autre => {
                    return Err(ErreurEval::FonctionNonAutorisee(format!(
                        "cible d’appel non nommée : {autre}"
                    )))
                }
            };

            let valeurs = args
                .iter()
                .map(|a| evaluer_nombre(a, ctx))
                .collect::<ResultatEval<Vec<_>>>()?;

            fonction.appliquer(&valeurs, ctx.mode).map(Valeur::Nombre)
        }
    }
}
