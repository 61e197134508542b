use contracts::enums::ProductCategory;
use leptos::prelude::*;

use crate::domain::a001_product::listing::ListingQuery;
use crate::shared::icons::icon;

/// Raw filter inputs of the stock table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockFilterForm {
    pub name: String,
    pub category: Option<ProductCategory>,
    pub min_price: String,
    pub max_price: String,
}

impl StockFilterForm {
    pub fn has_active(&self) -> bool {
        !self.name.is_empty()
            || self.category.is_some()
            || !self.min_price.is_empty()
            || !self.max_price.is_empty()
    }

    /// Unparseable prices are left out
    pub fn to_query(&self) -> ListingQuery {
        let price = |raw: &str| raw.trim().replace(',', ".").parse::<f64>().ok();
        let name = self.name.trim();
        ListingQuery {
            query: (!name.is_empty()).then(|| name.to_string()),
            category: self.category,
            min_price: price(&self.min_price),
            max_price: price(&self.max_price),
            names: Vec::new(),
        }
    }
}

/// Collapsible filter panel above the stock table
#[component]
pub fn StockFilters(
    form: RwSignal<StockFilterForm>,
    #[prop(into)] shown: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let active = Memo::new(move |_| form.with(|f| f.has_active()));

    view! {
        <div class="stock-filters">
            <div class="stock-filters__bar">
                <button class="stock-filters__toggle" on:click=move |_| open.update(|v| *v = !*v)>
                    {icon("filter")}
                    <span>"Filtros"</span>
                    <Show when=move || active.get()>
                        <span class="pill pill--success">"Activos"</span>
                    </Show>
                    <span class=move || if open.get() { "chevron chevron--open" } else { "chevron" }>
                        {icon("chevron-down")}
                    </span>
                </button>
                <Show when=move || active.get()>
                    <button class="button button--link" on:click=move |_| form.set(StockFilterForm::default())>
                        "Limpiar filtros"
                    </button>
                </Show>
                <span class="stock-filters__count">
                    {move || if active.get() {
                        format!("{} de {} productos", shown.get(), total.get())
                    } else {
                        let t = total.get();
                        format!("{} {}", t, if t == 1 { "producto" } else { "productos" })
                    }}
                </span>
            </div>

            <Show when=move || open.get()>
                <div class="stock-filters__panel">
                    <div class="form__group">
                        <label class="form__label">"Buscar por nombre o descripción"</label>
                        <input
                            type="text"
                            class="form__input"
                            placeholder="Buscar productos..."
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Categoría"</label>
                        <select
                            class="form__select"
                            prop:value=move || form.with(|f| f.category.map(|c| c.code()).unwrap_or(""))
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.category = ProductCategory::from_code(&value));
                            }
                        >
                            <option value="">"Todas las categorías"</option>
                            {ProductCategory::all().into_iter().map(|c| view! {
                                <option value=c.code()>{c.label()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Precio mínimo (S/)"</label>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            class="form__input"
                            placeholder="0.00"
                            prop:value=move || form.with(|f| f.min_price.clone())
                            on:input=move |ev| form.update(|f| f.min_price = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Precio máximo (S/)"</label>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            class="form__input"
                            placeholder="999.99"
                            prop:value=move || form.with(|f| f.max_price.clone())
                            on:input=move |ev| form.update(|f| f.max_price = event_target_value(&ev))
                        />
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_has_no_criteria() {
        let form = StockFilterForm::default();
        assert!(!form.has_active());
        assert_eq!(form.to_query(), ListingQuery::default());
    }

    #[test]
    fn prices_are_parsed_and_garbage_dropped() {
        let form = StockFilterForm {
            name: "  jarabe ".into(),
            category: Some(ProductCategory::RespiratoriosExpectorantes),
            min_price: "2,5".into(),
            max_price: "abc".into(),
        };
        assert!(form.has_active());
        let q = form.to_query();
        assert_eq!(q.query.as_deref(), Some("jarabe"));
        assert_eq!(q.min_price, Some(2.5));
        assert_eq!(q.max_price, None);
    }
}
