//! Sources page: list, create, edit, delete, and trigger collection.
//!
//! SYSTEM CONTEXT
//! ==============
//! A collection run changes both the source's bookkeeping and the post
//! list, so a successful trigger invalidates `sources` and every `posts`
//! entry. Create/update/delete only touch `sources`.
//!
//! Every source belongs to a source group owned by the operator. The dialog
//! picks one from `list_source_groups` and can create a new group inline.
//! The dialog stays open until a save succeeds, so a rejected save keeps
//! what was typed.

use leptos::prelude::*;
use query::{MutationState, QueryError, QueryKey, QueryOptions};
use wire::{ApiError, NewSource, NewSourceGroup, Source, SourceGroup, SourceType};

use crate::components::notice::{ErrorNotice, LOADING, Notice, NoticeKind};
use crate::net::api;
use crate::state::queries::{Mutation, keys, use_mutation, use_query};

#[cfg(test)]
#[path = "sources_test.rs"]
mod sources_test;

/// Keys a finished collection run makes stale.
fn collection_invalidations() -> Vec<QueryKey> {
    vec![keys::sources(), keys::posts()]
}

fn active_badge(is_active: bool) -> (&'static str, &'static str) {
    if is_active { ("Aktív", "badge badge--active") } else { ("Inaktív", "badge badge--inactive") }
}

/// First failure among the page's mutations, for the error banner.
fn first_error(states: &[MutationState]) -> Option<String> {
    states.iter().find_map(|s| s.error().map(str::to_owned))
}

/// A save closes the dialog only when the backend accepted it.
fn form_after_save<T>(result: &Result<T, ApiError>, form: Option<SourceForm>) -> Option<SourceForm> {
    if result.is_ok() { None } else { form }
}

fn save_label(pending: bool) -> &'static str {
    if pending { "Mentés..." } else { "Mentés" }
}

/// Picker entries as `(id, label)`. A selected id the backend no longer
/// lists is kept as a raw entry so editing does not silently move the source.
fn group_options(groups: &[SourceGroup], selected: &str) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = groups.iter().map(|g| (g.id.clone(), g.label())).collect();
    if !selected.is_empty() && !groups.iter().any(|g| g.id == selected) {
        options.insert(0, (selected.to_owned(), selected.to_owned()));
    }
    options
}

/// Body for the inline "new group" control; `None` for a blank name.
fn new_group_body(name: &str) -> Option<NewSourceGroup> {
    let name = name.trim();
    (!name.is_empty()).then(|| NewSourceGroup { name: name.to_owned(), description: None })
}

// =============================================================================
// FORM MODEL
// =============================================================================

/// Editable fields of the create/edit dialog.
#[derive(Clone, Debug, PartialEq)]
struct SourceForm {
    original: Option<Source>,
    source_type: String,
    identifier: String,
    name: String,
    group_id: String,
    is_active: bool,
}

impl SourceForm {
    fn blank() -> Self {
        Self {
            original: None,
            source_type: SourceType::Rss.as_str().to_owned(),
            identifier: String::new(),
            name: String::new(),
            group_id: String::new(),
            is_active: true,
        }
    }

    fn from_source(source: &Source) -> Self {
        Self {
            original: Some(source.clone()),
            source_type: source.source_type.as_str().to_owned(),
            identifier: source.identifier.clone(),
            name: source.name.clone().unwrap_or_default(),
            group_id: source.source_group_id.clone(),
            is_active: source.is_active,
        }
    }

    fn title(&self) -> &'static str {
        if self.original.is_some() { "Forrás Szerkesztése" } else { "Új Forrás" }
    }

    fn editing_id(&self) -> Option<String> {
        self.original.as_ref().map(|s| s.id.clone())
    }

    /// Preselect the first group when none is chosen yet.
    fn ensure_group(&mut self, groups: &[SourceGroup]) {
        if self.group_id.is_empty() {
            if let Some(first) = groups.first() {
                self.group_id.clone_from(&first.id);
            }
        }
    }

    /// Validate and build the request body. Edits start from the stored
    /// source so config and schedule survive untouched.
    fn to_new_source(&self) -> Result<NewSource, &'static str> {
        let identifier = self.identifier.trim();
        if identifier.is_empty() {
            return Err("Az azonosító megadása kötelező");
        }
        let group = self.group_id.trim();
        if group.is_empty() {
            return Err("Válassz forráscsoportot");
        }
        let mut body = self.original.as_ref().map_or_else(
            || NewSource {
                source_type: SourceType::Rss,
                identifier: String::new(),
                source_group_id: String::new(),
                name: None,
                config: None,
                is_active: None,
                schedule: None,
            },
            NewSource::from,
        );
        body.source_type = SourceType::from(self.source_type.clone());
        body.identifier = identifier.to_owned();
        body.source_group_id = group.to_owned();
        let name = self.name.trim();
        body.name = (!name.is_empty()).then(|| name.to_owned());
        body.is_active = Some(self.is_active);
        Ok(body)
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Sources page.
#[component]
pub fn SourcesPage() -> impl IntoView {
    let sources = use_query(keys::sources(), QueryOptions::default(), api::list_sources);
    let collect = use_mutation();
    let remove = use_mutation();
    let save = use_mutation();
    let form = RwSignal::new(None::<SourceForm>);

    let on_collect = Callback::new(move |id: String| {
        collect.run(collection_invalidations(), async move { api::trigger_collection(&id).await });
    });
    let on_delete = Callback::new(move |id: String| {
        remove.run(vec![keys::sources()], async move { api::delete_source(&id).await });
    });
    let open_form = move |next: SourceForm| {
        save.reset();
        form.set(Some(next));
    };
    let on_edit = Callback::new(move |source: Source| open_form(SourceForm::from_source(&source)));
    let on_save = Callback::new(move |(id, body): (Option<String>, NewSource)| {
        save.run_and_then(
            vec![keys::sources()],
            async move {
                match id {
                    Some(id) => api::update_source(&id, &body).await,
                    None => api::create_source(&body).await,
                }
            },
            move |result| form.update(|f| *f = form_after_save(result, f.take())),
        );
    });

    // Save failures are shown inside the dialog.
    let banner = move || first_error(&[collect.state(), remove.state()]);

    view! {
        <div class="page sources-page">
            <header class="page__header page__header--actions">
                <div>
                    <h1>"Források"</h1>
                    <p class="page__subtitle">"Kezeld az adatgyűjtési forrásokat"</p>
                </div>
                <button class="btn btn--primary" on:click=move |_| open_form(SourceForm::blank())>
                    "+ Új Forrás"
                </button>
            </header>

            {move || banner().map(|message| view! { <ErrorNotice message=message/> })}

            <Suspense fallback=move || view! { <Notice kind=NoticeKind::Loading text=LOADING/> }>
                {move || {
                    sources.get().map(|result| render_sources(result, collect, on_collect, on_edit, on_delete))
                }}
            </Suspense>

            <Show when=move || form.with(Option::is_some)>
                <SourceFormDialog form=form save=save on_save=on_save/>
            </Show>
        </div>
    }
}

fn render_sources(
    result: Result<Vec<Source>, QueryError>,
    collect: Mutation,
    on_collect: Callback<String>,
    on_edit: Callback<Source>,
    on_delete: Callback<String>,
) -> AnyView {
    match result {
        Ok(list) if list.is_empty() => {
            view! { <Notice kind=NoticeKind::Empty text="Nincsenek források. Adj hozzá egy újat!"/> }.into_any()
        }
        Ok(list) => view! {
            <div class="sources-page__grid">
                {list
                    .into_iter()
                    .map(|source| view! { <SourceCard source=source collect=collect on_collect=on_collect on_edit=on_edit on_delete=on_delete/> })
                    .collect_view()}
            </div>
        }
        .into_any(),
        Err(err) => view! { <ErrorNotice message=err.to_string()/> }.into_any(),
    }
}

#[component]
fn SourceCard(
    source: Source,
    collect: Mutation,
    on_collect: Callback<String>,
    on_edit: Callback<Source>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let (badge_text, badge_class) = active_badge(source.is_active);
    let id = source.id.clone();
    let delete_id = source.id.clone();
    let title = source.display_name().to_owned();
    let kind = source.source_type.label().to_owned();
    let identifier = source.identifier.clone();

    view! {
        <div class="source-card">
            <div class="source-card__header">
                <div>
                    <h3 class="source-card__name">{title}</h3>
                    <p class="source-card__type">{kind}</p>
                </div>
                <span class=badge_class>{badge_text}</span>
            </div>
            <p class="source-card__identifier">{identifier}</p>
            <div class="source-card__actions">
                <button
                    class="btn btn--primary source-card__collect"
                    disabled=move || collect.is_pending()
                    on:click=move |_| on_collect.run(id.clone())
                >
                    "▶ Gyűjtés"
                </button>
                <button class="btn btn--icon" title="Szerkesztés" on:click=move |_| on_edit.run(source.clone())>
                    "✎"
                </button>
                <button class="btn btn--icon btn--danger" title="Törlés" on:click=move |_| on_delete.run(delete_id.clone())>
                    "🗑"
                </button>
            </div>
        </div>
    }
}

/// Modal dialog for creating or editing a source.
#[component]
fn SourceFormDialog(
    form: RwSignal<Option<SourceForm>>,
    save: Mutation,
    on_save: Callback<(Option<String>, NewSource)>,
) -> impl IntoView {
    let error = RwSignal::new(None::<&'static str>);
    let groups = use_query(keys::source_groups(), QueryOptions::default(), api::list_source_groups);
    let loaded_groups = move || groups.get().and_then(Result::ok).unwrap_or_default();
    Effect::new(move |_| {
        let list = loaded_groups();
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                f.ensure_group(&list);
            }
        });
    });

    let create_group = use_mutation();
    let new_group = RwSignal::new(String::new());
    let add_group = move || {
        let Some(body) = new_group_body(&new_group.get_untracked()) else {
            return;
        };
        create_group.run_and_then(
            vec![keys::source_groups()],
            async move { api::create_source_group(&body).await },
            move |result| {
                if let Ok(group) = result {
                    form.update(|f| {
                        if let Some(f) = f.as_mut() {
                            f.group_id.clone_from(&group.id);
                        }
                    });
                    new_group.set(String::new());
                }
            },
        );
    };
    let edit = move |apply: fn(&mut SourceForm, String), value: String| {
        form.update(|f| {
            if let Some(f) = f.as_mut() {
                apply(f, value);
            }
        });
    };
    let read = move |field: fn(&SourceForm) -> String| form.with(|f| f.as_ref().map(field).unwrap_or_default());

    let on_cancel = move || form.set(None);
    let submit = move || {
        let Some(current) = form.get_untracked() else {
            return;
        };
        match current.to_new_source() {
            Ok(body) => {
                error.set(None);
                on_save.run((current.editing_id(), body));
            }
            Err(message) => error.set(Some(message)),
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel()>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{move || form.with(|f| f.as_ref().map_or("Új Forrás", SourceForm::title))}</h2>
                <label class="dialog__label">
                    "Típus"
                    <select
                        class="dialog__input"
                        prop:value=move || read(|f| f.source_type.clone())
                        on:change=move |ev| edit(|f, v| f.source_type = v, event_target_value(&ev))
                    >
                        {SourceType::KNOWN
                            .iter()
                            .map(|kind| view! { <option value=kind.as_str().to_owned()>{kind.label().to_owned()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="dialog__label">
                    "Azonosító"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="pl. https://telex.hu/rss"
                        prop:value=move || read(|f| f.identifier.clone())
                        on:input=move |ev| edit(|f, v| f.identifier = v, event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Név"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || read(|f| f.name.clone())
                        on:input=move |ev| edit(|f, v| f.name = v, event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Forráscsoport"
                    <select
                        class="dialog__input"
                        prop:value=move || read(|f| f.group_id.clone())
                        on:change=move |ev| edit(|f, v| f.group_id = v, event_target_value(&ev))
                    >
                        {move || {
                            group_options(&loaded_groups(), &read(|f| f.group_id.clone()))
                                .into_iter()
                                .map(|(id, label)| view! { <option value=id>{label}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <div class="dialog__inline">
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="Új csoport neve"
                        prop:value=move || new_group.get()
                        on:input=move |ev| new_group.set(event_target_value(&ev))
                    />
                    <button
                        class="btn btn--small"
                        disabled=move || create_group.is_pending() || new_group.with(|n| n.trim().is_empty())
                        on:click=move |_| add_group()
                    >
                        "+ Csoport"
                    </button>
                </div>
                <label class="dialog__label dialog__label--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.as_ref().is_some_and(|f| f.is_active))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| {
                                if let Some(f) = f.as_mut() {
                                    f.is_active = checked;
                                }
                            });
                        }
                    />
                    "Aktív"
                </label>
                {move || error.get().map(|message| view! { <p class="dialog__error">{message}</p> })}
                {move || {
                    first_error(&[save.state(), create_group.state()])
                        .map(|message| view! { <p class="dialog__error">{message}</p> })
                }}
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel()>
                        "Mégse"
                    </button>
                    <button class="btn btn--primary" disabled=move || save.is_pending() on:click=move |_| submit()>
                        {move || save_label(save.is_pending())}
                    </button>
                </div>
            </div>
        </div>
    }
}
