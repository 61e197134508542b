use contracts::enums::ProductCategory;
use leptos::prelude::*;

use crate::domain::a002_offer::ui::OfferCarousel;
use crate::layout::global_context::use_global;
use crate::routes::route::{CatalogQuery, Route};

/// Featured sections of the landing page: category, title, blurb
const SECTIONS: [(ProductCategory, &str, &str); 8] = [
    (
        ProductCategory::CuidadoPersonalHigiene,
        "Cuidado Personal e Higiene",
        "Productos para el cuidado diario y la higiene personal",
    ),
    (
        ProductCategory::RespiratoriosExpectorantes,
        "Respiratorios",
        "Tratamientos para afecciones respiratorias",
    ),
    (
        ProductCategory::VitaminasSuplementosNutricionales,
        "Vitaminas y Suplementos",
        "Complementos nutricionales para tu bienestar",
    ),
    (
        ProductCategory::DermatologicosTratamientosCutaneos,
        "Dermatológicos",
        "Cuidado y tratamiento de la piel",
    ),
    (
        ProductCategory::GastrointestinalesDigestivos,
        "Digestivos",
        "Productos para la salud digestiva",
    ),
    (
        ProductCategory::PediatricosLactancia,
        "Pediátricos",
        "Productos especializados para bebés y niños",
    ),
    (
        ProductCategory::AnalgesicosAntinflamatorios,
        "Analgésicos y Antiinflamatorios",
        "Medicamentos para el dolor y la inflamación",
    ),
    (
        ProductCategory::Otros,
        "Otros Productos",
        "Productos diversos para el cuidado de la salud",
    ),
];

/// Landing page (`/`)
#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_global();

    view! {
        <div class="home-page">
            <OfferCarousel />

            <section class="home-page__hero">
                <h1>"Bienvenido a " <span class="brand">"Astrafarma"</span></h1>
                <p class="muted">
                    "Tu farmacia de confianza. Encuentra todo lo que necesitas para cuidar tu salud y bienestar"
                </p>
                <button
                    class="button button--primary button--large"
                    on:click=move |_| ctx.navigate(Route::Catalog(CatalogQuery::default()))
                >
                    "Ver Todos los Productos"
                </button>
            </section>

            <section class="home-page__sections">
                <h2>"Nuestras Secciones"</h2>
                <p class="muted">"Explora nuestras categorías más populares de productos farmacéuticos"</p>
                <div class="section-grid">
                    {SECTIONS.into_iter().map(|(category, title, blurb)| view! {
                        <button
                            class=format!("section-card {}", category.badge_class())
                            on:click=move |_| ctx.navigate(Route::Catalog(CatalogQuery::category(category)))
                        >
                            <h3>{title}</h3>
                            <p>{blurb}</p>
                            <span class="section-card__cta">"Ver productos →"</span>
                        </button>
                    }).collect_view()}
                </div>
            </section>
        </div>
    }
}
