use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    automation_builder::AutomationBuilderPage, automations::AutomationListPage, calendar::CalendarPage, contacts::ContactsPage,
    dashboard::DashboardPage, funnel_builder::FunnelBuilderPage, funnels::FunnelListPage,
    opportunities::OpportunitiesPage,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/contacts")]
    Contacts,
    #[at("/opportunities")]
    Opportunities,
    #[at("/calendar")]
    Calendar,
    #[at("/marketing/automations")]
    Automations,
    #[at("/marketing/automations/:id")]
    AutomationBuilder { id: String },
    #[at("/marketing/funnels")]
    Funnels,
    #[at("/marketing/funnels/:id")]
    FunnelBuilder { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Contacts => html! { <ContactsPage /> },
        Route::Opportunities => html! { <OpportunitiesPage /> },
        Route::Calendar => html! { <CalendarPage /> },
        Route::Automations => html! { <AutomationListPage /> },
        Route::AutomationBuilder { id } => html! { <AutomationBuilderPage {id} /> },
        Route::Funnels => html! { <FunnelListPage /> },
        Route::FunnelBuilder { id } => html! { <FunnelBuilderPage {id} /> },
        Route::NotFound => html! {
            <div class="min-h-full flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-gray-900">{"404"}</h1>
                    <p class="text-xl mt-4 text-gray-500">{"Page Not Found"}</p>
                </div>
            </div>
        },
    }
}
