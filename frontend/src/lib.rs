pub mod api;
pub mod autocomplete;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod format;
pub mod grid;
pub mod itinerary;
pub mod log_sheet;
mod logging;
pub mod maplibre;
pub mod route_map;

use std::collections::BTreeMap;

use seed::{prelude::*, virtual_dom::AtValue, *};
use shared::{GeocodeResult, LocationSuggestion, RouteResult};
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::HtmlCanvasElement;

use crate::autocomplete::{Autocomplete, SuggestionTicket};
use crate::canvas::CanvasSurface;
use crate::config::ViewConfig;
use crate::controller::{Phase, Refresh, RequestTicket, Resolution, SubmitError, Tab, ViewController};
use crate::error::ApiError;
use crate::form::{Field, FieldErrors, GEOCODE_FAILED_MESSAGE, TripForm};
use crate::itinerary::{Itinerary, TripSummary};
use crate::log_sheet::SheetDetails;
use crate::maplibre::MapLibreSurface;
use crate::route_map::RouteMapPresenter;

const MAP_CONTAINER_ID: &str = "route-map";

pub struct Model {
    config: ViewConfig,
    controller: ViewController,
    form: TripForm,
    field_errors: FieldErrors,
    autocomplete: BTreeMap<Field, Autocomplete>,
    suggestion_timers: BTreeMap<Field, CmdHandle>,
    route_map: RouteMapPresenter<MapLibreSurface>,
    log_canvas: ElRef<HtmlCanvasElement>,
}

pub enum Msg {
    FieldChanged(Field, String),
    FieldBlurred(Field),
    Geocoded(Field, String, Result<GeocodeResult, ApiError>),
    SuggestionsDue(Field, SuggestionTicket, String),
    SuggestionsFetched(Field, SuggestionTicket, Vec<LocationSuggestion>),
    SuggestionPicked(Field, usize),
    SuggestionsDismissed(Field),
    Submit,
    RouteFetched(RequestTicket, Result<RouteResult, ApiError>),
    MapContainerShown,
    SelectTab(Tab),
    PreviousLog,
    NextLog,
    PaintLog,
    PrintLog,
}

pub fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    let config = ViewConfig::default();
    logging::debug(&format!("using API root {}", config.api_root));
    Model {
        route_map: RouteMapPresenter::new(config.fit_padding),
        config,
        controller: ViewController::new(),
        form: TripForm::default(),
        field_errors: FieldErrors::default(),
        autocomplete: Field::LOCATIONS
            .into_iter()
            .map(|field| (field, Autocomplete::default()))
            .collect(),
        suggestion_timers: BTreeMap::new(),
        log_canvas: ElRef::default(),
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::FieldChanged(field, value) => {
            model.field_errors.remove(field);
            let lookup = model
                .autocomplete
                .get_mut(&field)
                .and_then(|state| state.input(&value, model.config.min_query_len));
            model.form.set(field, value);
            match lookup {
                Some((ticket, query)) => {
                    let handle = orders.perform_cmd_with_handle(cmds::timeout(
                        model.config.suggestion_debounce_ms,
                        move || Msg::SuggestionsDue(field, ticket, query),
                    ));
                    model.suggestion_timers.insert(field, handle);
                }
                None => {
                    model.suggestion_timers.remove(&field);
                }
            }
        }
        Msg::FieldBlurred(field) => {
            model.suggestion_timers.remove(&field);
            if let Some(state) = model.autocomplete.get_mut(&field) {
                state.dismiss();
            }
            let address = model.form.value(field).trim().to_string();
            if !field.is_location() || address.is_empty() {
                return;
            }
            let root = model.config.api_root.clone();
            let value = model.form.value(field).to_string();
            orders.perform_cmd(async move {
                Msg::Geocoded(field, value, api::geocode(root, address).await)
            });
        }
        Msg::Geocoded(field, value, result) => {
            if model.form.value(field) != value {
                return;
            }
            match result {
                Ok(place) => {
                    if let Some(state) = model.autocomplete.get_mut(&field) {
                        state.set_found(place.display_name);
                    }
                }
                Err(err) => {
                    logging::debug(&format!("geocoding {value:?} failed: {err}"));
                    model.field_errors.insert(field, GEOCODE_FAILED_MESSAGE);
                }
            }
        }
        Msg::SuggestionsDue(field, ticket, query) => {
            model.suggestion_timers.remove(&field);
            let current = model
                .autocomplete
                .get(&field)
                .is_some_and(|state| state.is_current(ticket));
            if !current {
                return;
            }
            let root = model.config.api_root.clone();
            let min_len = model.config.min_query_len;
            orders.perform_cmd(async move {
                let suggestions = api::location_suggestions(root, query, min_len).await;
                Msg::SuggestionsFetched(field, ticket, suggestions)
            });
        }
        Msg::SuggestionsFetched(field, ticket, suggestions) => {
            if let Some(state) = model.autocomplete.get_mut(&field) {
                state.accept(ticket, suggestions);
            }
        }
        Msg::SuggestionPicked(field, index) => {
            let picked = model
                .autocomplete
                .get_mut(&field)
                .and_then(|state| state.pick(index));
            if let Some(name) = picked {
                model.form.set(field, name);
                model.field_errors.remove(field);
            }
        }
        Msg::SuggestionsDismissed(field) => {
            if let Some(state) = model.autocomplete.get_mut(&field) {
                state.dismiss();
            }
        }
        Msg::Submit => match model.controller.submit(&model.form) {
            Ok((ticket, payload)) => {
                model.field_errors = FieldErrors::default();
                let root = model.config.api_root.clone();
                orders.perform_cmd(async move {
                    Msg::RouteFetched(ticket, api::calculate_route(root, payload).await)
                });
            }
            Err(SubmitError::Invalid(errors)) => model.field_errors = errors,
            Err(SubmitError::InFlight) => {}
        },
        Msg::RouteFetched(ticket, result) => {
            if model.controller.resolve(ticket, result) != Resolution::Ready {
                return;
            }
            if let Some(route) = model.controller.route() {
                let scene = model.route_map.present(&route.stops, &route.polyline);
                logging::debug(&format!(
                    "route ready: {} markers, {} path points, {} logs",
                    scene.markers.len(),
                    scene.path.len(),
                    route.logs.len()
                ));
            }
            orders.after_next_render(|_| Msg::MapContainerShown);
        }
        Msg::MapContainerShown => {
            if model.route_map.is_attached() {
                model.route_map.refresh();
            } else {
                model.route_map.attach(MapLibreSurface::mount(
                    MAP_CONTAINER_ID,
                    model.config.initial_view,
                ));
            }
            orders.skip();
        }
        Msg::SelectTab(tab) => match model.controller.select_tab(tab) {
            Refresh::Map => {
                orders.after_next_render(|_| Msg::MapContainerShown);
            }
            Refresh::Log(_) => {
                orders.after_next_render(|_| Msg::PaintLog);
            }
            Refresh::Nothing => {}
        },
        Msg::PreviousLog => {
            if model.controller.previous_log().is_some() {
                orders.after_next_render(|_| Msg::PaintLog);
            }
        }
        Msg::NextLog => {
            if model.controller.next_log().is_some() {
                orders.after_next_render(|_| Msg::PaintLog);
            }
        }
        Msg::PaintLog => {
            orders.skip();
            let (Some(log), Some(canvas)) = (model.controller.active_log(), model.log_canvas.get())
            else {
                return;
            };
            let drawing = log_sheet::render(log, model.config.log_canvas);
            match CanvasSurface::from_element(&canvas) {
                Some(mut surface) => drawing.paint(&mut surface),
                None => logging::error("log canvas has no 2d context"),
            }
        }
        Msg::PrintLog => {
            orders.skip();
            if let Err(err) = window().print() {
                logging::error(&format!("print failed: {err:?}"));
            }
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["min-h-screen", "bg-gray-100"],
        header![
            C!["bg-blue-800", "text-white", "py-4", "shadow-md"],
            h1![
                C!["text-2xl", "font-bold", "container", "mx-auto", "px-4"],
                i![C!["fas", "fa-truck", "mr-2"]],
                "Truck Route Planner with HOS Compliance"
            ],
        ],
        main![
            C!["container", "mx-auto", "px-4", "py-6", "grid", "md:grid-cols-3", "gap-6"],
            div![
                C!["md:col-span-1", "bg-white", "p-4", "rounded", "shadow-md"],
                h2![C!["text-xl", "font-bold", "mb-4"], "Trip Details"],
                view_form(model),
                view_error(model),
            ],
            div![C!["md:col-span-2"], view_results(model)],
        ],
    ]
}

fn view_form(model: &Model) -> Node<Msg> {
    let loading = model.controller.is_loading();
    form![
        C!["space-y-4"],
        ev(Ev::Submit, |event| {
            event.prevent_default();
            Msg::Submit
        }),
        Field::LOCATIONS.iter().map(|field| view_location_field(model, *field)),
        view_cycle_field(model),
        p![
            C!["text-sm", "text-gray-600"],
            "Using 70 hour/8 day cycle for property-carrying drivers"
        ],
        button![
            C!["w-full", "py-2", "px-4", "rounded-md", "text-white", "bg-blue-600"],
            attrs! {
                At::Type => "submit",
                At::Disabled => bool_attr(loading),
            },
            if loading {
                "Calculating Route..."
            } else {
                "Calculate Route"
            },
        ],
    ]
}

fn view_location_field(model: &Model, field: Field) -> Node<Msg> {
    let state = model.autocomplete.get(&field);
    let error = model.field_errors.get(field);
    div![
        label![C!["block", "text-sm", "font-medium", "text-gray-700"], field.label()],
        div![
            C!["mt-1", "relative"],
            input![
                C!["block", "w-full", "px-3", "py-2", "border", "rounded-md",
                    if error.is_some() { "border-red-300" } else { "border-gray-300" }],
                attrs! {
                    At::Type => "text",
                    At::Name => field.name(),
                    At::Value => model.form.value(field),
                    At::Placeholder => field.placeholder(),
                    At::AutoComplete => "off",
                },
                input_ev(Ev::Input, move |value| Msg::FieldChanged(field, value)),
                ev(Ev::Blur, move |_| Msg::FieldBlurred(field)),
                keyboard_ev(Ev::KeyDown, move |event| {
                    (event.key() == "Escape").then_some(Msg::SuggestionsDismissed(field))
                }),
            ],
            state.map(|state| view_suggestions(field, state.suggestions())),
            state
                .and_then(Autocomplete::found)
                .map(|name| div![C!["mt-1", "text-sm", "text-gray-500"], format!("Found: {name}")]),
            error.map(|message| p![C!["mt-1", "text-sm", "text-red-600"], message]),
        ],
    ]
}

fn view_suggestions(field: Field, suggestions: &[LocationSuggestion]) -> Node<Msg> {
    if suggestions.is_empty() {
        return empty![];
    }
    div![
        C!["absolute", "z-10", "w-full", "bg-white", "border", "rounded-md", "shadow-lg", "mt-1",
            "max-h-60", "overflow-y-auto"],
        suggestions.iter().enumerate().map(|(index, suggestion)| {
            div![
                C!["px-4", "py-2", "hover:bg-blue-100", "cursor-pointer", "text-sm"],
                &suggestion.display_name,
                // mousedown fires before the input's blur
                ev(Ev::MouseDown, move |event| {
                    event.prevent_default();
                    Msg::SuggestionPicked(field, index)
                }),
            ]
        }),
    ]
}

fn view_cycle_field(model: &Model) -> Node<Msg> {
    let field = Field::CycleHours;
    let error = model.field_errors.get(field);
    div![
        label![C!["block", "text-sm", "font-medium", "text-gray-700"], field.label()],
        input![
            C!["block", "w-full", "px-3", "py-2", "border", "rounded-md",
                if error.is_some() { "border-red-300" } else { "border-gray-300" }],
            attrs! {
                At::Type => "number",
                At::Name => field.name(),
                At::Min => "0",
                At::Max => "70",
                At::Step => "0.5",
                At::Value => model.form.value(field),
                At::Placeholder => field.placeholder(),
            },
            input_ev(Ev::Input, move |value| Msg::FieldChanged(field, value)),
        ],
        error.map(|message| p![C!["mt-1", "text-sm", "text-red-600"], message]),
    ]
}

fn view_error(model: &Model) -> Option<Node<Msg>> {
    let message = model.controller.error()?;
    (model.controller.phase() == Phase::Failed).then(|| {
        div![
            C!["mt-4", "p-3", "bg-red-100", "text-red-700", "rounded"],
            p![C!["font-bold"], "Error"],
            p![message],
        ]
    })
}

fn view_results(model: &Model) -> Node<Msg> {
    let Some(route) = model.controller.route() else {
        return div![
            C!["bg-white", "p-6", "rounded", "shadow-md", "text-center"],
            i![C!["fas", "fa-truck-moving", "text-6xl", "text-gray-300", "mb-4"]],
            h2![C!["text-xl", "font-bold", "text-gray-700"], "Enter Trip Details to Calculate Your Route"],
            p![
                C!["text-gray-500", "mt-2"],
                "Fill out the form to get HOS-compliant route plans and ELD logs."
            ],
        ];
    };
    let active = model.controller.active_tab();

    div![
        C!["bg-white", "rounded", "shadow-md"],
        nav![
            C!["flex", "border-b"],
            Tab::ALL.iter().map(|tab| {
                let tab = *tab;
                button![
                    C![
                        "px-4",
                        "py-2",
                        "font-medium",
                        if tab == active {
                            "text-blue-600 border-b-2 border-blue-600"
                        } else {
                            "text-gray-600 hover:text-blue-600"
                        }
                    ],
                    i![C!["fas", format!("fa-{}", tab.icon()), "mr-1"]],
                    tab.title(),
                    ev(Ev::Click, move |_| Msg::SelectTab(tab)),
                ]
            }),
        ],
        div![
            C!["p-4"],
            // The map container stays mounted so the map survives tab switches.
            div![
                id!(MAP_CONTAINER_ID),
                C!["w-full", "h-[500px]", "rounded", IF!(active != Tab::Map => "hidden")],
            ],
            IF!(active == Tab::Details => view_details(route)),
            IF!(active == Tab::Logs => view_logs(model)),
        ],
    ]
}

fn view_details(route: &RouteResult) -> Node<Msg> {
    let summary = TripSummary::from_route(route);
    let Itinerary {
        summary_counts,
        timeline,
    } = itinerary::build(&route.stops);
    let card = |label: &str, value: String| {
        div![
            C!["bg-gray-50", "p-3", "rounded"],
            div![C!["text-sm", "text-gray-500"], label],
            div![C!["text-lg", "font-medium"], value],
        ]
    };

    div![
        C!["space-y-6"],
        section![
            h3![C!["text-lg", "font-medium"], "Trip Summary"],
            div![
                C!["mt-2", "grid", "sm:grid-cols-2", "gap-4"],
                card("Total Distance", summary.distance),
                card("Total Duration", summary.duration),
                card("Estimated Start", summary.estimated_start),
                card("Estimated Delivery", summary.estimated_delivery),
            ],
        ],
        section![
            h3![C!["text-lg", "font-medium"], "Stop Summary"],
            div![
                C!["mt-2", "grid", "grid-cols-2", "sm:grid-cols-4", "gap-4"],
                summary_counts
                    .iter()
                    .map(|(kind, count)| card(&itinerary::summary_label(kind), count.to_string())),
            ],
        ],
        section![
            h3![C!["text-lg", "font-medium"], "Trip Timeline"],
            div![
                C!["mt-2", "relative"],
                timeline.iter().map(|entry| {
                    div![
                        C!["relative", "pl-10", "pb-8"],
                        div![
                            C!["absolute", "left-1", "top-1", "w-6", "h-6", "rounded-full",
                                format!("bg-{}-500", entry.color_key), "text-white"],
                            i![C!["fas", format!("fa-{}", entry.icon_key), "text-sm"]],
                        ],
                        div![
                            C!["bg-white", "p-3", "rounded", "shadow-sm"],
                            div![C!["font-medium"], &entry.label],
                            div![C!["text-sm", "text-gray-600"], &entry.address],
                            div![
                                C!["mt-1", "flex", "justify-between", "text-sm"],
                                span![format!("Arrival: {}", entry.arrival_text())],
                                entry
                                    .duration_text()
                                    .map(|duration| span![format!("Duration: {duration}")]),
                            ],
                        ],
                    ]
                }),
            ],
        ],
    ]
}

fn view_logs(model: &Model) -> Node<Msg> {
    let controller = &model.controller;
    let Some(log) = controller.active_log() else {
        return p![C!["text-gray-500"], "No daily logs for this trip."];
    };
    let details = SheetDetails::from_log(log);
    let dims = model.config.log_canvas;
    let labelled = |label: &str, value: &str| {
        div![
            label![C!["block", "text-xs", "text-gray-600"], label],
            div![C!["font-medium"], value],
        ]
    };

    div![
        div![
            C!["mb-4", "flex", "justify-between", "items-center"],
            h3![C!["text-xl", "font-bold"], "Driver's Daily Logs"],
            div![
                C!["flex", "space-x-2"],
                button![
                    attrs! { At::Disabled => bool_attr(!controller.has_previous_log()) },
                    ev(Ev::Click, |_| Msg::PreviousLog),
                    "Previous",
                ],
                span![controller.pagination_caption()],
                button![
                    attrs! { At::Disabled => bool_attr(!controller.has_next_log()) },
                    ev(Ev::Click, |_| Msg::NextLog),
                    "Next",
                ],
            ],
        ],
        div![
            C!["bg-white", "border", "rounded", "p-2"],
            div![
                C!["flex", "justify-between", "mb-4"],
                div![
                    h3![C!["text-lg", "font-bold"], "Driver's Daily Log"],
                    p![C!["text-sm"], format!("Date: {}", details.date)],
                ],
                button![
                    C!["px-4", "py-2", "bg-blue-600", "text-white", "rounded"],
                    ev(Ev::Click, |_| Msg::PrintLog),
                    "Print Log",
                ],
            ],
            div![
                C!["grid", "md:grid-cols-2", "gap-4", "mb-4"],
                div![
                    C!["border", "p-3", "rounded", "grid", "grid-cols-3", "gap-2"],
                    labelled("From:", &details.carrier),
                    labelled("To:", &details.destination),
                    labelled("Total Miles:", &details.total_miles),
                ],
                div![
                    C!["border", "p-3", "rounded", "grid", "grid-cols-3", "gap-2"],
                    labelled("Main Office:", &details.main_office),
                    labelled("Home Terminal:", &details.home_terminal),
                    labelled("Carrier/Driver:", &details.driver),
                ],
            ],
            canvas![
                el_ref(&model.log_canvas),
                C!["w-full", "h-auto"],
                attrs! {
                    At::Width => dims.width.to_string(),
                    At::Height => dims.height.to_string(),
                },
            ],
            div![
                C!["mt-4", "grid", "md:grid-cols-2", "gap-4"],
                labelled("Shipping Documents:", &details.shipping_docs),
                labelled("Remarks:", &details.remarks),
            ],
            div![
                C!["mt-4", "border-t", "pt-4", "text-center", "text-sm"],
                div![C!["text-gray-500"], log_sheet::CERTIFICATION],
                div![C!["border-b", "border-black", "w-64", "mx-auto", "mt-4", "mb-1"]],
                div![log_sheet::SIGNATURE_LABEL],
            ],
        ],
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
