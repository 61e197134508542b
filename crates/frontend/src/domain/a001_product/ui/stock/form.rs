use contracts::domain::a001_product::aggregate::{Product, ProductDto, ProductId};
use contracts::enums::ProductCategory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::domain::a001_product::api;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_auth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    Url,
    File,
}

/// Form contents; price stays text until submission
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: ProductCategory,
    pub image_url: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: ProductCategory::Otros,
            image_url: String::new(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: format!("{}", p.price),
            category: p.category,
            image_url: p.image_url.clone().unwrap_or_default(),
        }
    }
}

impl ProductDraft {
    pub fn to_dto(&self) -> Result<ProductDto, String> {
        let price_text = self.price.trim();
        if price_text.is_empty() {
            return Err("El precio no puede estar vacío".to_string());
        }
        let price = price_text
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| "El precio debe ser un número mayor o igual a 0".to_string())?;
        let dto = ProductDto {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            image_url: self.image_url.trim().to_string(),
            category: self.category,
        };
        dto.validate()?;
        Ok(dto)
    }
}

/// Create (no `product`) or edit dialog of the stock console
#[component]
pub fn ProductFormModal(
    product: Option<Product>,
    on_saved: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let editing: Option<ProductId> = product.as_ref().map(|p| p.id);
    let is_edit = editing.is_some();

    let draft = RwSignal::new(product.as_ref().map(ProductDraft::from).unwrap_or_default());
    let image_mode = RwSignal::new(ImageMode::Url);
    let image_file = RwSignal::new_local(None::<File>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let switch_mode = move |mode: ImageMode| {
        image_mode.set(mode);
        match mode {
            ImageMode::Url => image_file.set(None),
            ImageMode::File => draft.update(|d| d.image_url.clear()),
        }
    };

    let on_file = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        image_file.set(file);
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.token() else {
            error.set(Some(
                "No tienes permisos para crear o editar productos. Inicia sesión como administrador."
                    .to_string(),
            ));
            return;
        };
        let dto = match draft.with_untracked(|d| d.to_dto()) {
            Ok(dto) => dto,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        let file = image_file.get_untracked();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            let result = match editing {
                Some(id) => api::update(&token, id, &dto, file.as_ref()).await,
                None => api::create(&token, &dto, file.as_ref()).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    log::info!("product {} saved", saved.id);
                    on_saved.run(());
                }
                Err(e) => {
                    log::error!("product save failed: {}", e);
                    let msg = if is_edit {
                        "Error al actualizar el producto"
                    } else {
                        "Error al crear el producto"
                    };
                    error.set(Some(msg.to_string()));
                }
            }
        });
    };

    let close = Callback::new(move |_| {
        if !saving.get_untracked() {
            on_close.run(());
        }
    });

    let text_field = move |label: &'static str, get: fn(&ProductDraft) -> String, set: fn(&mut ProductDraft, String)| {
        view! {
            <div class="form__group">
                <label class="form__label">{label}</label>
                <input
                    type="text"
                    class="form__input"
                    prop:value=move || draft.with(|d| get(d))
                    on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
                    disabled=move || saving.get()
                />
            </div>
        }
    };

    let title = if is_edit { "Editar Producto" } else { "Nuevo Producto" };

    view! {
        <ModalFrame
            title=title.to_string()
            on_close=close
            close_on_overlay=false
            modal_class="product-modal"
        >
            <form class="product-form" on:submit=submit>
                {move || error.get().map(|e| view! {
                    <div class="error-message">
                        <span>{e}</span>
                        <button type="button" class="error-message__close" on:click=move |_| error.set(None)>
                            "×"
                        </button>
                    </div>
                })}

                <div class="product-form__preview">
                    {move || {
                        let url = draft.with(|d| d.image_url.trim().to_string());
                        match (image_mode.get(), image_file.with(|f| f.as_ref().map(|f| f.name()))) {
                            (ImageMode::File, Some(name)) => view! { <span class="muted">{name}</span> }.into_any(),
                            (ImageMode::Url, _) if !url.is_empty() => view! { <img src=url alt="Vista previa" /> }.into_any(),
                            _ => view! { <span class="muted">"Sin imagen"</span> }.into_any(),
                        }
                    }}
                </div>

                {text_field("Nombre *", |d| d.name.clone(), |d, v| d.name = v)}

                <div class="form__group">
                    <label class="form__label">"Descripción *"</label>
                    <textarea
                        class="form__textarea"
                        rows="3"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        disabled=move || saving.get()
                    />
                </div>

                <div class="form__row">
                    <div class="form__group">
                        <label class="form__label">"Precio (S/) *"</label>
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            name="price"
                            class="form__input"
                            placeholder="0.00"
                            prop:value=move || draft.with(|d| d.price.clone())
                            on:input=move |ev| draft.update(|d| d.price = event_target_value(&ev))
                            disabled=move || saving.get()
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Categoría *"</label>
                        <select
                            class="form__select"
                            prop:value=move || draft.with(|d| d.category.code())
                            on:change=move |ev| {
                                if let Some(c) = ProductCategory::from_code(&event_target_value(&ev)) {
                                    draft.update(|d| d.category = c);
                                }
                            }
                            disabled=move || saving.get()
                        >
                            {ProductCategory::all().into_iter().map(|c| view! {
                                <option value=c.code()>{c.long_label()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                </div>

                <div class="form__group">
                    <label class="form__label">"Imagen"</label>
                    <div class="segmented">
                        <button
                            type="button"
                            class=move || if image_mode.get() == ImageMode::Url { "segmented__item segmented__item--active" } else { "segmented__item" }
                            on:click=move |_| switch_mode(ImageMode::Url)
                        >
                            "URL"
                        </button>
                        <button
                            type="button"
                            class=move || if image_mode.get() == ImageMode::File { "segmented__item segmented__item--active" } else { "segmented__item" }
                            on:click=move |_| switch_mode(ImageMode::File)
                        >
                            "Archivo"
                        </button>
                    </div>
                    <Show
                        when=move || image_mode.get() == ImageMode::Url
                        fallback=move || view! {
                            <label class="file-drop">
                                <input type="file" accept="image/*" on:change=on_file />
                                <span>
                                    {move || image_file.with(|f| f.as_ref().map(|f| f.name())).unwrap_or_else(|| {
                                        "Haz clic para seleccionar o arrastra una imagen aquí".to_string()
                                    })}
                                </span>
                            </label>
                        }
                    >
                        {text_field("URL de la imagen", |d| d.image_url.clone(), |d, v| d.image_url = v)}
                    </Show>
                </div>

                <div class="modal__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| close.run(())
                        disabled=Signal::derive(move || saving.get())
                    >
                        "Cancelar"
                    </Button>
                    <button type="submit" class="button button--primary" disabled=move || saving.get()>
                        {move || match (saving.get(), is_edit) {
                            (true, true) => "Actualizando...",
                            (true, false) => "Creando...",
                            (false, true) => "Actualizar Producto",
                            (false, false) => "Crear Producto",
                        }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductDraft {
        ProductDraft {
            name: " Ibuprofeno ".into(),
            description: "400mg".into(),
            price: "12.5".into(),
            category: ProductCategory::AnalgesicosAntinflamatorios,
            image_url: "  ".into(),
        }
    }

    #[test]
    fn draft_converts_to_trimmed_dto() {
        let dto = filled().to_dto().unwrap();
        assert_eq!(dto.name, "Ibuprofeno");
        assert_eq!(dto.price, 12.5);
        assert_eq!(dto.image_url, "");
    }

    #[test]
    fn empty_or_negative_price_is_rejected() {
        let mut draft = filled();
        draft.price = " ".into();
        assert_eq!(draft.to_dto().unwrap_err(), "El precio no puede estar vacío");
        draft.price = "-1".into();
        assert!(draft.to_dto().is_err());
        draft.price = "0".into();
        assert!(draft.to_dto().is_ok());
    }

    #[test]
    fn accepts_decimal_comma() {
        let mut draft = filled();
        draft.price = "3,20".into();
        assert_eq!(draft.to_dto().unwrap().price, 3.2);
    }
}
