// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand l’affichage a le focus)
// - Tactile : gros boutons colorés par famille, focus redonné après clic (focus_entree)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui::{self, Color32, RichText};

use super::etat::{AppCalc, Touche, PAVE};
use crate::noyau::{evaluer_avec_demarche, format_affichage, Contexte};

/// Fond de la fenêtre.
pub const FOND: Color32 = Color32::from_rgb(0x20, 0x20, 0x20);

const FOND_CHIFFRE: Color32 = Color32::from_rgb(0x2e, 0x2e, 0x2e);
const FOND_FONCTION: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const FOND_SPECIAL: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);
const FOND_EGAL: Color32 = Color32::from_rgb(0xff, 0x8c, 0x00);

const TAILLE_TOUCHE: [f32; 2] = [88.0, 64.0];

fn couleur_touche(t: Touche) -> Color32 {
    match t {
        Touche::Egal => FOND_EGAL,
        Touche::Effacer | Touche::Retour | Touche::Inverse | Touche::Degres | Touche::Ans => {
            FOND_SPECIAL
        }
        Touche::Fonction(_) | Touche::Texte("π") => FOND_FONCTION,
        Touche::Texte(_) => FOND_CHIFFRE,
    }
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_affichage(ui);

                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.affichage)
                .desired_width(ui.available_width())
                .font(egui::FontId::proportional(36.0))
                .text_color(Color32::WHITE)
                .hint_text("0")
                .id_salt("affichage_edit"),
        );

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.eval_via_noyau();
        }
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for touche in rangee {
                        self.bouton(ui, touche);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton(&mut self, ui: &mut egui::Ui, touche: Touche) {
        let texte = RichText::new(touche.libelle())
            .size(24.0)
            .color(Color32::WHITE);
        let resp = ui.add_sized(
            TAILLE_TOUCHE,
            egui::Button::new(texte).fill(couleur_touche(touche)),
        );
        if !resp.clicked() {
            return;
        }

        match touche {
            Touche::Egal => self.eval_via_noyau(),
            t => self.appuyer(t),
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(RichText::new("Démarche").color(Color32::WHITE))
            .default_open(false)
            .show(ui, |ui| {
                let mode = if self.mode.est_degres() {
                    "degrés"
                } else {
                    "radians"
                };
                Self::champ_demarche(ui, "Mode", "demarche_mode", mode);
                Self::champ_demarche(ui, "Ans", "demarche_ans", &format_affichage(self.ans));
                Self::champ_demarche(
                    ui,
                    "Normalisée",
                    "demarche_normalisee",
                    &self.demarche.normalisee,
                );
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Arbre", "demarche_arbre", &self.demarche.arbre);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("{titre} :")).color(Color32::LIGHT_GRAY));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(RichText::new(contenu).monospace().color(Color32::WHITE));
                });
            });
    }

    /// Évalue l’affichage via le noyau (Ans + mode courants), puis dépose le résultat.
    fn eval_via_noyau(&mut self) {
        let ctx = Contexte {
            ans: self.ans,
            mode: self.mode,
        };
        let resultat = evaluer_avec_demarche(&self.expression_a_evaluer(), ctx);
        self.deposer(resultat);
    }
}
