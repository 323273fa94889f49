use super::{
    repository::CategoriesRepository,
    utils::{parse_category_id, CategoryForm, CATEGORIES_ROUTE, CATEGORY_FIELDS},
};
use crate::{
    api::{ApiClient, ApiError, Category, CategoryPayload},
    components::forms::FieldErrors,
    utils::navigation::redirect_to,
};
use leptos::*;

fn repository() -> CategoriesRepository {
    CategoriesRepository::new(use_context::<ApiClient>().unwrap_or_else(ApiClient::new))
}

fn invalid_id() -> ApiError {
    ApiError::validation("Invalid category id.")
}

#[derive(Clone, Copy)]
pub struct CategoriesListViewModel {
    pub categories: Resource<u32, Result<Vec<Category>, ApiError>>,
    pub reload: RwSignal<u32>,
    pub pending_delete: RwSignal<Option<Category>>,
    pub notice: RwSignal<Option<String>>,
    pub error: RwSignal<Option<ApiError>>,
    pub delete_action: Action<i64, Result<(), ApiError>>,
}

impl CategoriesListViewModel {
    pub fn ask_delete(&self, category: Category) {
        self.notice.set(None);
        self.pending_delete.set(Some(category));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if self.delete_action.pending().get_untracked() {
            return;
        }
        if let Some(category) = self.pending_delete.get_untracked() {
            self.delete_action.dispatch(category.id);
        }
    }

    fn settle_delete(&self, result: Result<(), ApiError>) {
        self.pending_delete.set(None);
        match result {
            Ok(()) => {
                self.error.set(None);
                self.notice.set(Some("Category deleted.".to_string()));
                self.reload.update(|n| *n += 1);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_categories_list_view_model() -> CategoriesListViewModel {
    let repo = repository();
    let reload = create_rw_signal(0u32);
    let categories = {
        let repo = repo.clone();
        create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = repo.clone();
                async move { repo.list().await }
            },
        )
    };
    let delete_action = create_action(move |id: &i64| {
        let repo = repo.clone();
        let id = *id;
        async move { repo.delete(id).await }
    });
    let vm = CategoriesListViewModel {
        categories,
        reload,
        pending_delete: create_rw_signal(None),
        notice: create_rw_signal(None),
        error: create_rw_signal(None),
        delete_action,
    };
    create_effect(move |_| {
        if let Some(result) = vm.delete_action.value().get() {
            vm.settle_delete(result);
        }
    });
    vm
}

pub fn use_category_resource(raw_id: String) -> Resource<(), Result<Category, ApiError>> {
    let repo = repository();
    create_local_resource(
        || (),
        move |_| {
            let repo = repo.clone();
            let id = parse_category_id(&raw_id);
            async move {
                match id {
                    Some(id) => repo.get(id).await,
                    None => Err(invalid_id()),
                }
            }
        },
    )
}

/// Shared by create and edit; `id` is `None` when creating.
#[derive(Clone, Copy)]
pub struct CategoryFormViewModel {
    pub id: Option<i64>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub field_errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<ApiError>>,
    pub save_action: Action<(Option<i64>, CategoryPayload), Result<(), ApiError>>,
}

impl CategoryFormViewModel {
    pub fn fill(&self, category: &Category) {
        let form = CategoryForm::from(category);
        self.name.set(form.name);
        self.description.set(form.description);
    }

    pub fn clear_field(&self, field: &str) {
        if self.field_errors.with_untracked(|e| e.contains(field)) {
            self.field_errors.update(|e| e.remove(field));
        }
    }

    pub fn submit(&self) {
        if self.save_action.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        let form = CategoryForm {
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
        };
        match form.validate() {
            Ok(payload) => {
                self.field_errors.set(FieldErrors::new());
                self.save_action.dispatch((self.id, payload));
            }
            Err(errors) => self.field_errors.set(errors),
        }
    }

    /// Returns true when the save went through.
    pub fn apply_result(&self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                let mut errors = self.field_errors.get_untracked();
                let banner = errors.absorb(err, CATEGORY_FIELDS);
                self.field_errors.set(errors);
                self.error.set(banner);
                false
            }
        }
    }
}

pub fn use_category_form_view_model(id: Option<i64>) -> CategoryFormViewModel {
    let repo = repository();
    let save_action = create_action(move |(id, payload): &(Option<i64>, CategoryPayload)| {
        let repo = repo.clone();
        let id = *id;
        let payload = payload.clone();
        async move { repo.save(id, payload).await }
    });
    let vm = CategoryFormViewModel {
        id,
        name: create_rw_signal(String::new()),
        description: create_rw_signal(String::new()),
        field_errors: create_rw_signal(FieldErrors::new()),
        error: create_rw_signal(None),
        save_action,
    };
    create_effect(move |_| {
        if let Some(result) = vm.save_action.value().get() {
            if vm.apply_result(result) {
                log::info!("category saved");
                redirect_to(CATEGORIES_ROUTE);
            }
        }
    });
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::{test_support::mock::*, CATEGORIES_PATH},
        pages::categories::utils::FIELD_NAME,
        state::auth::AuthStatus,
        test_support::{
            helpers::{admin_profile, provide_auth},
            ssr::with_runtime,
        },
    };

    fn cardiology() -> Category {
        Category {
            id: 4,
            name: "Cardiology".into(),
            description: Some("Heart".into()),
        }
    }

    #[test]
    fn submit_requires_a_name() {
        with_runtime(|| {
            let fixture = provide_auth(AuthStatus::Authenticated, Some(admin_profile()));
            let vm = use_category_form_view_model(None);
            vm.submit();
            assert!(vm.field_errors.get().contains(FIELD_NAME));
            assert_eq!(fixture.server.hits(&POST, CATEGORIES_PATH), 0);

            vm.clear_field(FIELD_NAME);
            assert!(vm.field_errors.get().is_empty());
        });
    }

    #[test]
    fn fill_copies_existing_values() {
        with_runtime(|| {
            provide_auth(AuthStatus::Authenticated, Some(admin_profile()));
            let vm = use_category_form_view_model(Some(4));
            vm.fill(&cardiology());
            assert_eq!(vm.name.get(), "Cardiology");
            assert_eq!(vm.description.get(), "Heart");
        });
    }

    #[test]
    fn server_field_errors_land_on_the_field() {
        with_runtime(|| {
            provide_auth(AuthStatus::Authenticated, Some(admin_profile()));
            let vm = use_category_form_view_model(None);
            let saved = vm.apply_result(Err(ApiError::http(400, "Name taken").on_field(FIELD_NAME)));
            assert!(!saved);
            assert_eq!(vm.field_errors.get().get(FIELD_NAME), Some("Name taken"));
            assert!(vm.error.get().is_none());

            assert!(!vm.apply_result(Err(ApiError::http(500, "down"))));
            assert!(vm.error.get().is_some());
            assert!(vm.apply_result(Ok(())));
        });
    }

    #[test]
    fn delete_flow_tracks_the_pending_category() {
        with_runtime(|| {
            provide_auth(AuthStatus::Authenticated, Some(admin_profile()));
            let vm = use_categories_list_view_model();
            vm.ask_delete(cardiology());
            assert_eq!(vm.pending_delete.get().map(|c| c.id), Some(4));
            vm.cancel_delete();
            assert!(vm.pending_delete.get().is_none());

            vm.ask_delete(cardiology());
            vm.settle_delete(Ok(()));
            assert!(vm.pending_delete.get().is_none());
            assert_eq!(vm.reload.get(), 1);
            assert_eq!(vm.notice.get().as_deref(), Some("Category deleted."));

            vm.settle_delete(Err(ApiError::http(500, "down")));
            assert!(vm.error.get().is_some());
            assert_eq!(vm.reload.get(), 1);
        });
    }
}
