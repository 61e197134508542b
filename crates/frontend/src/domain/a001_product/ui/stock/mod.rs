mod filters;
mod form;

use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::filters::{StockFilterForm, StockFilters};
use self::form::ProductFormModal;
use crate::domain::a001_product::api::{self, ProductsApi};
use crate::domain::a001_product::listing::{fetch_listing, ListingState};
use crate::shared::components::notification::{Notice, Notification};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::STOCK_PAGE_SIZE;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ConfirmDialog;
use crate::system::auth::context::use_auth;
use crate::usecases::u501_export_catalog::{use_edit_state, ExportCatalogButton};

/// Which product dialog is open
#[derive(Clone)]
enum Dialog {
    Create,
    Edit(Product),
}

/// Admin stock console (`/stock`)
#[component]
pub fn StockPage() -> impl IntoView {
    let auth = use_auth();
    let edit_state = use_edit_state();

    let filters = RwSignal::new(StockFilterForm::default());
    let criteria = Memo::new(move |_| filters.with(|f| f.to_query()));
    let state = RwSignal::new(ListingState::default());
    let dialog = RwSignal::new(None::<Dialog>);
    let to_delete = RwSignal::new(None::<Product>);
    let deleting = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);

    let load = move |page: usize| {
        let query = criteria.get_untracked();
        let Some(ticket) = state.try_update(|s| s.begin()) else {
            return;
        };
        spawn_local(async move {
            let outcome = fetch_listing(&ProductsApi, &query, page, STOCK_PAGE_SIZE).await;
            state.update(|s| {
                s.apply(ticket, outcome);
            });
        });
    };

    Effect::new(move |_| {
        criteria.track();
        load(1);
    });

    let on_page_change = Callback::new(move |page: usize| {
        if state.with_untracked(|s| s.can_go_to(page)) {
            load(page);
        }
    });

    let on_saved = Callback::new(move |_| {
        dialog.set(None);
        edit_state.mark_edited();
        load(1);
    });

    let confirm_delete = Callback::new(move |_| {
        let Some(product) = to_delete.get_untracked() else {
            return;
        };
        let Some(token) = auth.token() else {
            log::error!("stock: delete without session");
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            match api::delete(&token, product.id).await {
                Ok(()) => {
                    log::info!("product {} deleted", product.id);
                    to_delete.set(None);
                    edit_state.mark_edited();
                    load(state.with_untracked(|s| s.result.page));
                }
                Err(e) => {
                    log::error!("product delete failed: {}", e);
                    notice.set(Some(Notice::from(&e)));
                }
            }
            deleting.set(false);
        });
    });

    // another admin may have deleted it since the page was loaded
    let open_edit = move |product: Product| {
        spawn_local(async move {
            match api::exists(product.id).await {
                Ok(true) => dialog.set(Some(Dialog::Edit(product))),
                Ok(false) => {
                    notice.set(Some(Notice::error("El producto ya no existe")));
                    load(state.with_untracked(|s| s.result.page));
                }
                Err(e) => {
                    log::error!("product {} lookup failed: {}", product.id, e);
                    notice.set(Some(Notice::from(&e)));
                }
            }
        });
    };

    let cancel_delete = Callback::new(move |_| {
        if !deleting.get_untracked() {
            to_delete.set(None);
        }
    });

    let current_page = Signal::derive(move || state.with(|s| s.result.page));
    let total_pages = Signal::derive(move || state.with(|s| s.result.total_pages));
    let total_count = Signal::derive(move || state.with(|s| s.result.total_count));
    let shown = Signal::derive(move || state.with(|s| s.result.items.len()));
    let loading = Signal::derive(move || state.with(|s| s.loading));

    view! {
        <div class="stock-page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Gestión del Catálogo"</h1>
                    <p class="muted">"Administra tu inventario de productos"</p>
                </div>
                <div class="header__actions">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| dialog.set(Some(Dialog::Create))>
                        {icon("plus")}
                        " Nuevo Producto"
                    </Button>
                    <ExportCatalogButton notice=notice />
                </div>
            </div>

            <Notification notice=notice />

            <div class="card stock-table">
                <StockFilters form=filters shown=shown total=total_count />

                {move || {
                    if loading.get() && shown.get() == 0 {
                        return view! { <div class="stock-table__loading"><Spinner /></div> }.into_any();
                    }
                    let items = state.with(|s| s.result.items.clone());
                    if items.is_empty() {
                        let (title, hint) = if filters.with(|f| f.has_active()) {
                            ("No se encontraron productos", "Intenta ajustar tus filtros de búsqueda")
                        } else {
                            ("No hay productos disponibles", "Los productos aparecerán aquí cuando se agreguen")
                        };
                        return view! {
                            <div class="empty-state">
                                <p class="empty-state__title">{title}</p>
                                <p class="muted">{hint}</p>
                            </div>
                        }.into_any();
                    }
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Producto"</th>
                                    <th>"Categoría"</th>
                                    <th>"Precio"</th>
                                    <th>"Acciones"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {items.into_iter().map(|product| {
                                    let for_edit = product.clone();
                                    let for_delete = product.clone();
                                    let description = if product.description.trim().is_empty() {
                                        "Sin descripción".to_string()
                                    } else {
                                        product.description.clone()
                                    };
                                    view! {
                                        <tr>
                                            <td class="stock-table__product">
                                                {product.image().map(|src| view! {
                                                    <img class="stock-table__thumb" src=src.to_string() alt=product.name.clone() />
                                                })}
                                                <div>
                                                    <div class="stock-table__name">{product.name.clone()}</div>
                                                    <div class="muted">{description}</div>
                                                </div>
                                            </td>
                                            <td>
                                                <span class=format!("badge {}", product.category.badge_class())>
                                                    {product.category.label()}
                                                </span>
                                            </td>
                                            <td class="stock-table__price">{product.formatted_price()}</td>
                                            <td class="stock-table__actions">
                                                <button
                                                    class="button button--icon"
                                                    title="Editar producto"
                                                    on:click=move |_| open_edit(for_edit.clone())
                                                >
                                                    {icon("edit")}
                                                </button>
                                                <button
                                                    class="button button--icon button--danger"
                                                    title="Eliminar producto"
                                                    on:click=move |_| to_delete.set(Some(for_delete.clone()))
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                }}

                <Show when=move || { total_pages.get() > 1 }>
                    <PaginationControls
                        current_page=current_page
                        total_pages=total_pages
                        total_count=total_count
                        disabled=loading
                        on_page_change=on_page_change
                    />
                </Show>
            </div>

            {move || dialog.get().map(|d| {
                let product = match d {
                    Dialog::Create => None,
                    Dialog::Edit(p) => Some(p),
                };
                view! {
                    <ProductFormModal
                        product=product
                        on_saved=on_saved
                        on_close=Callback::new(move |_| dialog.set(None))
                    />
                }
            })}

            {move || to_delete.get().map(|product| view! {
                <ConfirmDialog
                    title="Confirmar Eliminación"
                    message=format!(
                        "¿Estás seguro de que deseas eliminar \"{}\"? Esta acción no se puede deshacer.",
                        product.name
                    )
                    busy=deleting
                    on_confirm=confirm_delete
                    on_cancel=cancel_delete
                />
            })}
        </div>
    }
}
