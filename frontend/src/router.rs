use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAdmin, RequireAuth},
        layout::Layout,
    },
    pages::{
        categories::{CategoriesPage, CategoryCreatePage, CategoryEditPage, CategoryViewPage},
        dashboard::DashboardPage,
        login::LoginPage,
        profile::ProfilePage,
        register::RegisterPage,
        requests::{CreateRequestPage, RequestDetailsPage, RequestsPage},
    },
    state::auth::AuthProvider,
    utils::navigation::LOGIN_ROUTE,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/dashboard",
    "/profile",
    "/requests",
    "/requests/new",
    "/requests/:id",
    "/categories",
    "/categories/create",
    "/categories/view/:id",
    "/categories/edit/:id",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login", "/register"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/dashboard",
    "/profile",
    "/requests",
    "/requests/new",
    "/requests/:id",
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &[
    "/categories",
    "/categories/create",
    "/categories/view/:id",
    "/categories/edit/:id",
];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_meta_context();
    view! {
        <Title text="CarePortal"/>
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ToLogin/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/register" view=RegisterPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/profile" view=ProtectedProfile/>
                    <Route path="/requests" view=ProtectedRequests/>
                    <Route path="/requests/new" view=ProtectedCreateRequest/>
                    <Route path="/requests/:id" view=ProtectedRequestDetails/>
                    <Route path="/categories" view=AdminCategories/>
                    <Route path="/categories/create" view=AdminCategoryCreate/>
                    <Route path="/categories/view/:id" view=AdminCategoryView/>
                    <Route path="/categories/edit/:id" view=AdminCategoryEdit/>
                    <Route path="/*any" view=ToLogin/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ToLogin() -> impl IntoView {
    view! { <Redirect path=LOGIN_ROUTE/> }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><Layout><DashboardPage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><Layout><ProfilePage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedRequests() -> impl IntoView {
    view! { <RequireAuth><Layout><RequestsPage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedCreateRequest() -> impl IntoView {
    view! { <RequireAuth><Layout><CreateRequestPage/></Layout></RequireAuth> }
}

#[component]
fn ProtectedRequestDetails() -> impl IntoView {
    view! { <RequireAuth><Layout><RequestDetailsPage/></Layout></RequireAuth> }
}

#[component]
fn AdminCategories() -> impl IntoView {
    view! { <RequireAdmin><Layout><CategoriesPage/></Layout></RequireAdmin> }
}

#[component]
fn AdminCategoryCreate() -> impl IntoView {
    view! { <RequireAdmin><Layout><CategoryCreatePage/></Layout></RequireAdmin> }
}

#[component]
fn AdminCategoryView() -> impl IntoView {
    view! { <RequireAdmin><Layout><CategoryViewPage/></Layout></RequireAdmin> }
}

#[component]
fn AdminCategoryEdit() -> impl IntoView {
    view! { <RequireAdmin><Layout><CategoryEditPage/></Layout></RequireAdmin> }
}
