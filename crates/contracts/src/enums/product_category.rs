use serde::{Deserialize, Serialize};

/// Catalog product categories (fixed set defined by the backend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    CuidadoPersonalHigiene,
    VitaminasSuplementosNutricionales,
    RespiratoriosExpectorantes,
    AntibioticosAntivirales,
    DermatologicosTratamientosCutaneos,
    AnalgesicosAntinflamatorios,
    MaterialMedicoEquipos,
    MedicinaNaturalHidratacion,
    PediatricosLactancia,
    GastrointestinalesDigestivos,
    GinecologicosUrologicos,
    CardiovascularesAntidiabeticos,
    Oftalmologicos,
    AntihistaminicosAntialergicos,
    NeurologicosPsiquiatricos,
    Otros,
}

impl ProductCategory {
    /// Wire code, as used in query strings and JSON
    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::CuidadoPersonalHigiene => "CUIDADO_PERSONAL_HIGIENE",
            ProductCategory::VitaminasSuplementosNutricionales => {
                "VITAMINAS_SUPLEMENTOS_NUTRICIONALES"
            }
            ProductCategory::RespiratoriosExpectorantes => "RESPIRATORIOS_EXPECTORANTES",
            ProductCategory::AntibioticosAntivirales => "ANTIBIOTICOS_ANTIVIRALES",
            ProductCategory::DermatologicosTratamientosCutaneos => {
                "DERMATOLOGICOS_TRATAMIENTOS_CUTANEOS"
            }
            ProductCategory::AnalgesicosAntinflamatorios => "ANALGESICOS_ANTINFLAMATORIOS",
            ProductCategory::MaterialMedicoEquipos => "MATERIAL_MEDICO_EQUIPOS",
            ProductCategory::MedicinaNaturalHidratacion => "MEDICINA_NATURAL_HIDRATACION",
            ProductCategory::PediatricosLactancia => "PEDIATRICOS_LACTANCIA",
            ProductCategory::GastrointestinalesDigestivos => "GASTROINTESTINALES_DIGESTIVOS",
            ProductCategory::GinecologicosUrologicos => "GINECOLOGICOS_UROLOGICOS",
            ProductCategory::CardiovascularesAntidiabeticos => "CARDIOVASCULARES_ANTIDIABETICOS",
            ProductCategory::Oftalmologicos => "OFTALMOLOGICOS",
            ProductCategory::AntihistaminicosAntialergicos => "ANTIHISTAMINICOS_ANTIALERGICOS",
            ProductCategory::NeurologicosPsiquiatricos => "NEUROLOGICOS_PSIQUIATRICOS",
            ProductCategory::Otros => "OTROS",
        }
    }

    /// Short label for filters and badges
    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::CuidadoPersonalHigiene => "Cuidado Personal",
            ProductCategory::VitaminasSuplementosNutricionales => "Vitaminas y Suplementos",
            ProductCategory::RespiratoriosExpectorantes => "Respiratorios",
            ProductCategory::AntibioticosAntivirales => "Antibióticos",
            ProductCategory::DermatologicosTratamientosCutaneos => "Dermatológicos",
            ProductCategory::AnalgesicosAntinflamatorios => "Analgésicos",
            ProductCategory::MaterialMedicoEquipos => "Material Médico",
            ProductCategory::MedicinaNaturalHidratacion => "Medicina Natural",
            ProductCategory::PediatricosLactancia => "Pediátricos",
            ProductCategory::GastrointestinalesDigestivos => "Gastrointestinales",
            ProductCategory::GinecologicosUrologicos => "Ginecológicos",
            ProductCategory::CardiovascularesAntidiabeticos => "Cardiovasculares",
            ProductCategory::Oftalmologicos => "Oftalmológicos",
            ProductCategory::AntihistaminicosAntialergicos => "Antihistamínicos",
            ProductCategory::NeurologicosPsiquiatricos => "Neurológicos",
            ProductCategory::Otros => "Otros",
        }
    }

    /// Full label for forms and the section menu
    pub fn long_label(&self) -> &'static str {
        match self {
            ProductCategory::CuidadoPersonalHigiene => "Cuidado Personal e Higiene",
            ProductCategory::VitaminasSuplementosNutricionales => {
                "Vitaminas y Suplementos Nutricionales"
            }
            ProductCategory::RespiratoriosExpectorantes => "Respiratorios y Expectorantes",
            ProductCategory::AntibioticosAntivirales => "Antibióticos y Antivirales",
            ProductCategory::DermatologicosTratamientosCutaneos => {
                "Dermatológicos y Tratamientos Cutáneos"
            }
            ProductCategory::AnalgesicosAntinflamatorios => "Analgésicos y Antiinflamatorios",
            ProductCategory::MaterialMedicoEquipos => "Material Médico y Equipos",
            ProductCategory::MedicinaNaturalHidratacion => "Medicina Natural e Hidratación",
            ProductCategory::PediatricosLactancia => "Pediátricos y Lactancia",
            ProductCategory::GastrointestinalesDigestivos => "Gastrointestinales y Digestivos",
            ProductCategory::GinecologicosUrologicos => "Ginecológicos y Urológicos",
            ProductCategory::CardiovascularesAntidiabeticos => {
                "Cardiovasculares y Antidiabéticos"
            }
            ProductCategory::Oftalmologicos => "Oftalmológicos",
            ProductCategory::AntihistaminicosAntialergicos => "Antihistamínicos y Antialérgicos",
            ProductCategory::NeurologicosPsiquiatricos => "Neurológicos y Psiquiátricos",
            ProductCategory::Otros => "Otros",
        }
    }

    /// CSS modifier used for the category badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            ProductCategory::CuidadoPersonalHigiene => "badge--blue",
            ProductCategory::VitaminasSuplementosNutricionales => "badge--green",
            ProductCategory::RespiratoriosExpectorantes => "badge--cyan",
            ProductCategory::AntibioticosAntivirales => "badge--red",
            ProductCategory::DermatologicosTratamientosCutaneos => "badge--pink",
            ProductCategory::AnalgesicosAntinflamatorios => "badge--orange",
            ProductCategory::MaterialMedicoEquipos => "badge--indigo",
            ProductCategory::MedicinaNaturalHidratacion => "badge--emerald",
            ProductCategory::PediatricosLactancia => "badge--purple",
            ProductCategory::GastrointestinalesDigestivos => "badge--yellow",
            ProductCategory::GinecologicosUrologicos => "badge--rose",
            ProductCategory::CardiovascularesAntidiabeticos => "badge--red",
            ProductCategory::Oftalmologicos => "badge--sky",
            ProductCategory::AntihistaminicosAntialergicos => "badge--lime",
            ProductCategory::NeurologicosPsiquiatricos => "badge--violet",
            ProductCategory::Otros => "badge--gray",
        }
    }

    /// All categories in display order
    pub fn all() -> Vec<ProductCategory> {
        vec![
            ProductCategory::CuidadoPersonalHigiene,
            ProductCategory::VitaminasSuplementosNutricionales,
            ProductCategory::RespiratoriosExpectorantes,
            ProductCategory::AntibioticosAntivirales,
            ProductCategory::DermatologicosTratamientosCutaneos,
            ProductCategory::AnalgesicosAntinflamatorios,
            ProductCategory::MaterialMedicoEquipos,
            ProductCategory::MedicinaNaturalHidratacion,
            ProductCategory::PediatricosLactancia,
            ProductCategory::GastrointestinalesDigestivos,
            ProductCategory::GinecologicosUrologicos,
            ProductCategory::CardiovascularesAntidiabeticos,
            ProductCategory::Oftalmologicos,
            ProductCategory::AntihistaminicosAntialergicos,
            ProductCategory::NeurologicosPsiquiatricos,
            ProductCategory::Otros,
        ]
    }

    /// Parses the wire code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|c| c.code() == code.trim())
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_matches_serde_form() {
        for category in ProductCategory::all() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.code()));
        }
    }

    #[test]
    fn from_code_round_trips() {
        assert_eq!(ProductCategory::all().len(), 16);
        assert_eq!(
            ProductCategory::from_code("ANALGESICOS_ANTINFLAMATORIOS"),
            Some(ProductCategory::AnalgesicosAntinflamatorios)
        );
        assert_eq!(ProductCategory::from_code("unknown"), None);
    }
}
