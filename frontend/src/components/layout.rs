use yew::prelude::*;
use yew_router::prelude::*;

use super::toast::Toaster;
use crate::routes::Route;
use crate::theme::ThemeToggle;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

/// Icon rail on the left, page content on the right, toasts on top.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let current_route = use_route::<Route>().unwrap_or(Route::Dashboard);

    html! {
        <div class="flex min-h-screen w-full bg-gray-50 dark:bg-gray-900">
            <aside class="fixed inset-y-0 left-0 z-10 w-14 flex flex-col items-center border-r border-gray-200 bg-white dark:bg-gray-800 dark:border-gray-700">
                <nav class="flex flex-col items-center gap-4 px-2 py-5">
                    <div class="flex h-8 w-8 items-center justify-center rounded-full bg-indigo-600 text-white font-semibold">
                        {"A"}
                    </div>
                    <SidebarLink route={Route::Dashboard} icon="home" label="Dashboard" current={current_route.clone()} />
                    <SidebarLink route={Route::Contacts} icon="users" label="Contacts" current={current_route.clone()} />
                    <SidebarLink route={Route::Opportunities} icon="target" label="Opportunities" current={current_route.clone()} />
                    <SidebarLink route={Route::Calendar} icon="calendar" label="Calendar" current={current_route.clone()} />
                    <SidebarLink route={Route::Automations} icon="bolt" label="Automations" current={current_route.clone()} />
                    <SidebarLink route={Route::Funnels} icon="funnel" label="Funnels" current={current_route.clone()} />
                </nav>
                <div class="mt-auto py-5">
                    <ThemeToggle />
                </div>
            </aside>

            <main class="flex flex-1 flex-col pl-14">
                { props.children.clone() }
            </main>

            <Toaster />
        </div>
    }
}

/// Marketing routes stay highlighted while a builder under them is open.
fn section_matches(route: &Route, current: &Route) -> bool {
    match (route, current) {
        (Route::Automations, Route::AutomationBuilder { .. }) => true,
        (Route::Funnels, Route::FunnelBuilder { .. }) => true,
        _ => route == current,
    }
}

#[derive(Properties, PartialEq)]
struct SidebarLinkProps {
    route: Route,
    icon: &'static str,
    label: &'static str,
    current: Route,
}

#[function_component(SidebarLink)]
fn sidebar_link(props: &SidebarLinkProps) -> Html {
    let classes = if section_matches(&props.route, &props.current) {
        "flex h-9 w-9 items-center justify-center rounded-lg bg-indigo-50 text-indigo-600 dark:bg-gray-700 dark:text-white"
    } else {
        "flex h-9 w-9 items-center justify-center rounded-lg text-gray-500 hover:text-gray-900 dark:hover:text-white"
    };

    let path = match props.icon {
        "home" => "M3 12l2-2m0 0l7-7 7 7M5 10v10a1 1 0 001 1h3m10-11l2 2m-2-2v10a1 1 0 01-1 1h-3m-6 0a1 1 0 001-1v-4a1 1 0 011-1h2a1 1 0 011 1v4a1 1 0 001 1m-6 0h6",
        "users" => "M17 20h5v-2a3 3 0 00-5.356-1.857M17 20H7m10 0v-2c0-.656-.126-1.283-.356-1.857M7 20H2v-2a3 3 0 015.356-1.857M7 20v-2c0-.656.126-1.283.356-1.857m0 0a5.002 5.002 0 019.288 0M15 7a3 3 0 11-6 0 3 3 0 016 0z",
        "target" => "M13 7h8m0 0v8m0-8l-8 8-4-4-6 6",
        "calendar" => "M8 7V3m8 4V3m-9 8h10M5 21h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v12a2 2 0 002 2z",
        "bolt" => "M13 10V3L4 14h7v7l9-11h-7z",
        "funnel" => "M3 4a1 1 0 011-1h16a1 1 0 011 1v2.586a1 1 0 01-.293.707l-6.414 6.414a1 1 0 00-.293.707V17l-4 4v-6.586a1 1 0 00-.293-.707L3.293 7.293A1 1 0 013 6.586V4z",
        _ => "",
    };

    html! {
        <Link<Route> to={props.route.clone()} classes={classes}>
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <title>{props.label}</title>
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d={path}/>
            </svg>
        </Link<Route>>
    }
}
