use super::repository::{DashboardRepository, FamilyEntry, RequestSummary};
use crate::api::{ApiClient, ApiError};
use leptos::*;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub family_resource: Resource<u32, Result<Vec<FamilyEntry>, ApiError>>,
    pub summary_resource: Resource<u32, Result<RequestSummary, ApiError>>,
    pub reload: RwSignal<u32>,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repo = DashboardRepository::new(api);
        let reload = create_rw_signal(0u32);

        let family_repo = repo.clone();
        let family_resource = create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = family_repo.clone();
                async move { repo.family_status().await }
            },
        );
        let summary_resource = create_local_resource(
            move || reload.get(),
            move |_| {
                let repo = repo.clone();
                async move { repo.request_summary().await }
            },
        );

        Self {
            family_resource,
            summary_resource,
            reload,
        }
    }

    pub fn retry(&self) {
        self.reload.update(|n| *n += 1);
    }
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        state::auth::AuthStatus,
        test_support::{
            helpers::{patient_profile, provide_auth},
            ssr::with_runtime,
        },
    };

    #[test]
    fn retry_bumps_reload_counter() {
        with_runtime(|| {
            provide_auth(AuthStatus::Authenticated, Some(patient_profile()));
            let vm = DashboardViewModel::new();
            assert_eq!(vm.reload.get(), 0);
            vm.retry();
            assert_eq!(vm.reload.get(), 1);
        });
    }
}
