use leptos::prelude::*;

use crate::components::integration_graph::IntegrationGraph;

/// Endpoint serving the integration graph payload.
const GRAPH_URL: &str = "/integration-graph.json";

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<IntegrationGraph url=GRAPH_URL />
				<div class="graph-overlay">
					<h1>"Integration Graph"</h1>
					<p class="subtitle">
						"Hover a component to trace its inbound and outbound dependencies. Scroll to zoom. Drag the background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
