//! Display strings for the supported languages.
//!
//! Every table is keyed by the same fixed keys. Lookups fall back to English
//! and finally to the key itself, so a missing translation never hides a label.

use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pl,
    De,
    Fr,
    Ja,
}

pub const ALL_LOCALES: [Locale; 5] = [Locale::En, Locale::Pl, Locale::De, Locale::Fr, Locale::Ja];

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pl => "pl",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Ja => "ja",
        }
    }

    /// Name of the language in that language, for the language picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Pl => "Polski",
            Locale::De => "Deutsch",
            Locale::Fr => "Français",
            Locale::Ja => "日本語",
        }
    }

    /// Parse a tag such as `de` or `de-AT`. Unknown tags give the default locale.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or("").to_ascii_lowercase();
        ALL_LOCALES
            .into_iter()
            .find(|l| l.tag() == primary)
            .unwrap_or_default()
    }
}

type Table = phf::Map<&'static str, &'static str>;

static EN: Table = phf_map! {
    "language" => "Language",
    "theme" => "Theme",
    "theme.system" => "System",
    "theme.light" => "Light",
    "theme.dark" => "Dark",
    "menu.file" => "File",
    "menu.exportCsv" => "Export history (CSV)",
    "menu.exportJson" => "Export history (JSON)",
    "calculator.title" => "RPE Calculator",
    "calculator.description" => "Calculate your estimated one-rep max based on weight, reps, and RPE",
    "calculator.liftType" => "Lift Type",
    "calculator.weight" => "Weight (kg/lbs)",
    "calculator.repetitions" => "Repetitions",
    "calculator.selectReps" => "Select reps",
    "calculator.rpe" => "RPE (Rate of Perceived Exertion)",
    "calculator.estimatedOneRepMax" => "Estimated One-Rep Max",
    "calculator.saveToHistory" => "Save to History",
    "calculator.mode" => "Formula",
    "calculator.modeHint" => "The two formulas give different results for the same set.",
    "calculator.breakdown" => "Formula breakdown",
    "mode.linear" => "Linear RPE",
    "mode.ensemble" => "7-formula average",
    "history.title" => "History",
    "history.liftType" => "Lift Type",
    "history.date" => "Date",
    "history.weight" => "Weight",
    "history.reps" => "Reps",
    "history.rpe" => "RPE",
    "history.oneRepMax" => "1RM",
    "history.actions" => "Actions",
    "history.deleteEntry" => "Delete entry",
    "history.clear" => "Clear history",
    "history.recordsFound" => "No records found",
    "filterAll" => "All",
    "notice.saved" => "Saved to history",
    "notice.invalid" => "Invalid input values",
    "notice.persistFailed" => "History could not be saved to disk",
    "notice.exported" => "History exported",
    "notice.exportFailed" => "Export failed",
};

static PL: Table = phf_map! {
    "language" => "Język",
    "theme" => "Motyw",
    "theme.system" => "Systemowy",
    "theme.light" => "Jasny",
    "theme.dark" => "Ciemny",
    "menu.file" => "Plik",
    "menu.exportCsv" => "Eksportuj historię (CSV)",
    "menu.exportJson" => "Eksportuj historię (JSON)",
    "calculator.title" => "Kalkulator RPE",
    "calculator.description" => "Oblicz szacowany maksymalny ciężar na jedno powtórzenie na podstawie ciężaru, powtórzeń i RPE",
    "calculator.liftType" => "Rodzaj boju",
    "calculator.weight" => "Ciężar (kg/lbs)",
    "calculator.repetitions" => "Powtórzenia",
    "calculator.selectReps" => "Wybierz powtórzenia",
    "calculator.rpe" => "RPE (skala odczuwanego wysiłku)",
    "calculator.estimatedOneRepMax" => "Szacowane 1RM",
    "calculator.saveToHistory" => "Zapisz w historii",
    "calculator.mode" => "Wzór",
    "calculator.modeHint" => "Oba wzory dają różne wyniki dla tej samej serii.",
    "calculator.breakdown" => "Wyniki poszczególnych wzorów",
    "mode.linear" => "Liniowy RPE",
    "mode.ensemble" => "Średnia 7 wzorów",
    "history.title" => "Historia",
    "history.liftType" => "Rodzaj boju",
    "history.date" => "Data",
    "history.weight" => "Ciężar",
    "history.reps" => "Powt.",
    "history.rpe" => "RPE",
    "history.oneRepMax" => "1RM",
    "history.actions" => "Akcje",
    "history.deleteEntry" => "Usuń wpis",
    "history.clear" => "Wyczyść historię",
    "history.recordsFound" => "Nie znaleziono wpisów",
    "filterAll" => "Wszystkie",
    "notice.saved" => "Zapisano w historii",
    "notice.invalid" => "Nieprawidłowe wartości",
    "notice.persistFailed" => "Nie udało się zapisać historii na dysku",
    "notice.exported" => "Wyeksportowano historię",
    "notice.exportFailed" => "Eksport nie powiódł się",
};

static DE: Table = phf_map! {
    "language" => "Sprache",
    "theme" => "Design",
    "theme.system" => "System",
    "theme.light" => "Hell",
    "theme.dark" => "Dunkel",
    "menu.file" => "Datei",
    "menu.exportCsv" => "Verlauf exportieren (CSV)",
    "menu.exportJson" => "Verlauf exportieren (JSON)",
    "calculator.title" => "RPE-Rechner",
    "calculator.description" => "Berechne dein geschätztes Ein-Wiederholungs-Maximum aus Gewicht, Wiederholungen und RPE",
    "calculator.liftType" => "Übung",
    "calculator.weight" => "Gewicht (kg/lbs)",
    "calculator.repetitions" => "Wiederholungen",
    "calculator.selectReps" => "Wiederholungen wählen",
    "calculator.rpe" => "RPE (wahrgenommene Anstrengung)",
    "calculator.estimatedOneRepMax" => "Geschätztes 1RM",
    "calculator.saveToHistory" => "Im Verlauf speichern",
    "calculator.mode" => "Formel",
    "calculator.modeHint" => "Die beiden Formeln liefern für denselben Satz unterschiedliche Werte.",
    "calculator.breakdown" => "Einzelne Formeln",
    "mode.linear" => "Lineares RPE",
    "mode.ensemble" => "Mittel aus 7 Formeln",
    "history.title" => "Verlauf",
    "history.liftType" => "Übung",
    "history.date" => "Datum",
    "history.weight" => "Gewicht",
    "history.reps" => "Wdh.",
    "history.rpe" => "RPE",
    "history.oneRepMax" => "1RM",
    "history.actions" => "Aktionen",
    "history.deleteEntry" => "Eintrag löschen",
    "history.clear" => "Verlauf leeren",
    "history.recordsFound" => "Keine Einträge gefunden",
    "filterAll" => "Alle",
    "notice.saved" => "Im Verlauf gespeichert",
    "notice.invalid" => "Ungültige Eingabewerte",
    "notice.persistFailed" => "Verlauf konnte nicht gespeichert werden",
    "notice.exported" => "Verlauf exportiert",
    "notice.exportFailed" => "Export fehlgeschlagen",
};

static FR: Table = phf_map! {
    "language" => "Langue",
    "theme" => "Thème",
    "theme.system" => "Système",
    "theme.light" => "Clair",
    "theme.dark" => "Sombre",
    "menu.file" => "Fichier",
    "menu.exportCsv" => "Exporter l'historique (CSV)",
    "menu.exportJson" => "Exporter l'historique (JSON)",
    "calculator.title" => "Calculateur RPE",
    "calculator.description" => "Calculez votre maximum estimé sur une répétition à partir du poids, des répétitions et du RPE",
    "calculator.liftType" => "Mouvement",
    "calculator.weight" => "Poids (kg/lbs)",
    "calculator.repetitions" => "Répétitions",
    "calculator.selectReps" => "Choisir les répétitions",
    "calculator.rpe" => "RPE (effort perçu)",
    "calculator.estimatedOneRepMax" => "1RM estimé",
    "calculator.saveToHistory" => "Enregistrer dans l'historique",
    "calculator.mode" => "Formule",
    "calculator.modeHint" => "Les deux formules donnent des résultats différents pour la même série.",
    "calculator.breakdown" => "Détail des formules",
    "mode.linear" => "RPE linéaire",
    "mode.ensemble" => "Moyenne de 7 formules",
    "history.title" => "Historique",
    "history.liftType" => "Mouvement",
    "history.date" => "Date",
    "history.weight" => "Poids",
    "history.reps" => "Rép.",
    "history.rpe" => "RPE",
    "history.oneRepMax" => "1RM",
    "history.actions" => "Actions",
    "history.deleteEntry" => "Supprimer l'entrée",
    "history.clear" => "Effacer l'historique",
    "history.recordsFound" => "Aucun enregistrement trouvé",
    "filterAll" => "Tous",
    "notice.saved" => "Enregistré dans l'historique",
    "notice.invalid" => "Valeurs saisies invalides",
    "notice.persistFailed" => "Impossible d'enregistrer l'historique sur le disque",
    "notice.exported" => "Historique exporté",
    "notice.exportFailed" => "Échec de l'export",
};

static JA: Table = phf_map! {
    "language" => "言語",
    "theme" => "テーマ",
    "theme.system" => "システム",
    "theme.light" => "ライト",
    "theme.dark" => "ダーク",
    "menu.file" => "ファイル",
    "menu.exportCsv" => "履歴をエクスポート (CSV)",
    "menu.exportJson" => "履歴をエクスポート (JSON)",
    "calculator.title" => "RPE計算機",
    "calculator.description" => "重量・回数・RPEから推定1RMを計算します",
    "calculator.liftType" => "種目",
    "calculator.weight" => "重量 (kg/lbs)",
    "calculator.repetitions" => "回数",
    "calculator.selectReps" => "回数を選択",
    "calculator.rpe" => "RPE (主観的運動強度)",
    "calculator.estimatedOneRepMax" => "推定1RM",
    "calculator.saveToHistory" => "履歴に保存",
    "calculator.mode" => "計算式",
    "calculator.modeHint" => "2つの計算式は同じセットでも異なる結果になります。",
    "calculator.breakdown" => "計算式ごとの内訳",
    "mode.linear" => "線形RPE",
    "mode.ensemble" => "7式の平均",
    "history.title" => "履歴",
    "history.liftType" => "種目",
    "history.date" => "日付",
    "history.weight" => "重量",
    "history.reps" => "回数",
    "history.rpe" => "RPE",
    "history.oneRepMax" => "1RM",
    "history.actions" => "操作",
    "history.deleteEntry" => "削除",
    "history.clear" => "履歴を消去",
    "history.recordsFound" => "記録がありません",
    "filterAll" => "すべて",
    "notice.saved" => "履歴に保存しました",
    "notice.invalid" => "入力値が無効です",
    "notice.persistFailed" => "履歴をディスクに保存できませんでした",
    "notice.exported" => "履歴をエクスポートしました",
    "notice.exportFailed" => "エクスポートに失敗しました",
};

fn table(locale: Locale) -> &'static Table {
    match locale {
        Locale::En => &EN,
        Locale::Pl => &PL,
        Locale::De => &DE,
        Locale::Fr => &FR,
        Locale::Ja => &JA,
    }
}

/// String lookup bound to the active locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dictionary {
    locale: Locale,
}

impl Dictionary {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: &'static str) -> &'static str {
        table(self.locale)
            .get(key)
            .or_else(|| EN.get(key))
            .copied()
            .unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_has_every_key() {
        for locale in ALL_LOCALES {
            let t = table(locale);
            for key in EN.keys() {
                assert!(t.contains_key(*key), "{} missing {key}", locale.tag());
            }
            assert_eq!(t.len(), EN.len(), "{} has extra keys", locale.tag());
        }
    }

    #[test]
    fn lookup_uses_active_locale() {
        assert_eq!(Dictionary::new(Locale::De).get("history.title"), "Verlauf");
        assert_eq!(Dictionary::new(Locale::En).get("history.title"), "History");
        assert_eq!(Dictionary::new(Locale::Ja).get("filterAll"), "すべて");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Dictionary::new(Locale::Fr).get("no.such.key"), "no.such.key");
    }

    #[test]
    fn locale_from_tag() {
        assert_eq!(Locale::from_tag("pl"), Locale::Pl);
        assert_eq!(Locale::from_tag("DE"), Locale::De);
        assert_eq!(Locale::from_tag("fr-CA"), Locale::Fr);
        assert_eq!(Locale::from_tag("ja_JP"), Locale::Ja);
        assert_eq!(Locale::from_tag("xx"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn locale_serializes_as_tag() {
        for locale in ALL_LOCALES {
            let json = serde_json::to_string(&locale).unwrap();
            assert_eq!(json, format!("\"{}\"", locale.tag()));
        }
    }
}
