//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (affichage, Ans, mode d’angle, démarche)
//! et appliquer les touches du pavé sur la chaîne affichée.
//!
//! Contrats :
//! - Aucune évaluation ici : `deposer` reçoit le résultat déjà calculé par le noyau.
//! - Actions déterministes, sans effet de bord caché.
//! - `ans` ne change que sur un succès.

use tracing::info;

use crate::noyau::{
    format_affichage, ClasseErreur, DemarcheNoyau, ErreurEval, ModeAngle, Nombre,
};

/// Préfixe visuel du mode degrés (retiré avant évaluation).
pub const PREFIXE_DEG: &str = "[DEG] ";

/// Texte affiché sur un échec d’évaluation.
pub const TEXTE_ERREUR: &str = "Error";

/// Une touche du pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// C
    Effacer,
    /// DEL
    Retour,
    Ans,
    /// Inv : ouvre `1/(`
    Inverse,
    /// Deg : bascule radians/degrés
    Degres,
    /// sin, cos, tan, sqrt, log : ouvre `nom(`
    Fonction(&'static str),
    /// chiffres, point, opérateurs, π : ajoutés tels quels
    Texte(&'static str),
    Egal,
}

impl Touche {
    pub fn libelle(self) -> &'static str {
        match self {
            Touche::Effacer => "C",
            Touche::Retour => "DEL",
            Touche::Ans => "Ans",
            Touche::Inverse => "Inv",
            Touche::Degres => "Deg",
            Touche::Fonction(nom) | Touche::Texte(nom) => nom,
            Touche::Egal => "=",
        }
    }
}

/// Disposition du pavé (4 colonnes).
pub const PAVE: [[Touche; 4]; 7] = [
    [Touche::Effacer, Touche::Retour, Touche::Ans, Touche::Inverse],
    [
        Touche::Fonction("sin"),
        Touche::Fonction("cos"),
        Touche::Fonction("tan"),
        Touche::Degres,
    ],
    [
        Touche::Texte("7"),
        Touche::Texte("8"),
        Touche::Texte("9"),
        Touche::Texte("/"),
    ],
    [
        Touche::Texte("4"),
        Touche::Texte("5"),
        Touche::Texte("6"),
        Touche::Texte("*"),
    ],
    [
        Touche::Texte("1"),
        Touche::Texte("2"),
        Touche::Texte("3"),
        Touche::Texte("-"),
    ],
    [
        Touche::Texte("0"),
        Touche::Texte("."),
        Touche::Texte("%"),
        Touche::Texte("+"),
    ],
    [
        Touche::Texte("π"),
        Touche::Fonction("sqrt"),
        Touche::Fonction("log"),
        Touche::Egal,
    ],
];

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- affichage (éditable au clavier) ---
    pub affichage: String,

    // --- contexte d’évaluation ---
    pub ans: Nombre,
    pub mode: ModeAngle,

    // --- démarche (panneau d’explication) ---
    pub demarche: DemarcheNoyau,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’affichage après un clic sur un bouton.
    pub focus_entree: bool,
}

impl AppCalc {
    pub fn new() -> Self {
        Self {
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            ..Default::default()
        }
    }

    /* ------------------------ Touches (état seulement) ------------------------ */

    /// Applique une touche autre que `=` (qui passe par le noyau, voir vue.rs).
    pub fn appuyer(&mut self, touche: Touche) {
        match touche {
            Touche::Effacer => self.clear_entree(),
            Touche::Retour => {
                self.affichage.pop();
            }
            Touche::Ans => self.affichage.push_str("Ans"),
            Touche::Inverse => self.affichage.push_str("1/("),
            Touche::Degres => self.basculer_mode(),
            Touche::Fonction(nom) => {
                self.affichage.push_str(nom);
                self.affichage.push('(');
            }
            Touche::Texte(t) => self.affichage.push_str(t),
            Touche::Egal => {}
        }
        self.focus_entree = true;
    }

    /// C (et ESC) : efface tout l’affichage, préfixe compris.
    pub fn clear_entree(&mut self) {
        self.affichage.clear();
        self.focus_entree = true;
    }

    /// Deg : bascule le mode et pose/retire le préfixe visuel.
    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.bascule();
        if self.mode.est_degres() {
            if !self.affichage.contains(PREFIXE_DEG.trim_end()) {
                self.affichage.insert_str(0, PREFIXE_DEG);
            }
        } else {
            self.affichage = self.affichage.replace(PREFIXE_DEG, "");
        }
        info!(mode = ?self.mode, "mode d’angle basculé");
    }

    /// Expression réellement envoyée au noyau (sans le préfixe visuel).
    pub fn expression_a_evaluer(&self) -> String {
        self.affichage.replace(PREFIXE_DEG, "")
    }

    /// Dépose le résultat d’une évaluation.
    ///
    /// - Expression vide : rien ne change.
    /// - Succès : l’affichage et `ans` prennent le résultat (entier sans `.0`).
    /// - Échec : l’affichage montre `Error`, `ans` est conservé.
    pub fn deposer(&mut self, resultat: Result<(Nombre, DemarcheNoyau), ErreurEval>) {
        match resultat {
            Err(e) if e.classe() == ClasseErreur::Vide => {}
            Ok((n, demarche)) => {
                let n = n.normalise();
                self.affichage = format_affichage(n);
                self.ans = n;
                self.demarche = demarche;
            }
            Err(e) => {
                info!(erreur = %e, "évaluation en échec");
                self.affichage = TEXTE_ERREUR.to_string();
                self.demarche = DemarcheNoyau::default();
            }
        }
        self.focus_entree = true;
    }
}
