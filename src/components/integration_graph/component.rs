//! Browser glue: fetch, the mermaid renderer binding, timers, pan/zoom and
//! hover wiring. Everything DOM-specific lives here; the modules this file
//! drives are plain Rust.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, MouseEvent, Response, SvgElement, WheelEvent, Window};

use super::controller::InteractionController;
use super::diagram;
use super::error::GraphError;
use super::highlight::{
	DEFAULT_STROKE, DEFAULT_WIDTH, EdgeVisual, HIGHLIGHT_STROKE, HIGHLIGHT_WIDTH, Scheduler,
};
use super::model::GraphModel;
use super::reach::{RenderedEdge, parse_edge_id};

#[wasm_bindgen]
unsafe extern "C" {
	#[wasm_bindgen(js_namespace = mermaid, js_name = initialize)]
	fn mermaid_initialize(config: &JsValue);

	#[wasm_bindgen(js_namespace = mermaid, js_name = render, catch)]
	async fn mermaid_render(id: &str, text: &str) -> Result<JsValue, JsValue>;
}

/// One-time styling configuration forwarded to the diagram renderer.
#[derive(Clone, Debug)]
pub struct ThemeOptions {
	/// Base renderer theme.
	pub theme: &'static str,
	/// Node fill.
	pub primary_color: &'static str,
	/// Node label color.
	pub primary_text_color: &'static str,
	/// Default edge stroke.
	pub line_color: &'static str,
	/// Accent color.
	pub tertiary_color: &'static str,
	/// Diagram background.
	pub main_bkg: &'static str,
}

impl Default for ThemeOptions {
	fn default() -> Self {
		Self {
			theme: "dark",
			primary_color: "#1e1e1e",
			primary_text_color: "#fff",
			line_color: "#fff",
			tertiary_color: "#fff",
			main_bkg: "#1e1e1e",
		}
	}
}

impl ThemeOptions {
	fn to_js(&self) -> JsValue {
		let vars = js_sys::Object::new();
		for (key, value) in [
			("primaryColor", self.primary_color),
			("primaryTextColor", self.primary_text_color),
			("lineColor", self.line_color),
			("tertiaryColor", self.tertiary_color),
			("mainBkg", self.main_bkg),
		] {
			let _ = js_sys::Reflect::set(&vars, &key.into(), &value.into());
		}
		let config = js_sys::Object::new();
		let _ = js_sys::Reflect::set(&config, &"startOnLoad".into(), &false.into());
		let _ = js_sys::Reflect::set(&config, &"theme".into(), &self.theme.into());
		let _ = js_sys::Reflect::set(&config, &"themeVariables".into(), &vars);
		config.into()
	}
}

/// The external diagram-layout collaborator: turns a textual description
/// into drawable markup. Layout and drawing are black boxes to this crate.
pub trait DiagramRenderer {
	/// One-time styling configuration.
	fn configure_theme(&self, theme: &ThemeOptions);
	/// Lays out and draws the description, returning SVG markup.
	async fn render_diagram(&self, text: &str) -> Result<String, GraphError>;
}

/// Binding to the mermaid library loaded on the page.
pub struct MermaidRenderer;

impl DiagramRenderer for MermaidRenderer {
	fn configure_theme(&self, theme: &ThemeOptions) {
		mermaid_initialize(&theme.to_js());
	}

	async fn render_diagram(&self, text: &str) -> Result<String, GraphError> {
		let result = mermaid_render("graphDiv", text)
			.await
			.map_err(|e| GraphError::Render(js_message(&e)))?;
		js_sys::Reflect::get(&result, &JsValue::from_str("svg"))
			.ok()
			.and_then(|v| v.as_string())
			.ok_or_else(|| GraphError::Render("renderer returned no svg markup".into()))
	}
}

fn js_message(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js";

/// Injects a script tag and resolves once it has loaded, so the renderer
/// library does not have to be part of the host page.
async fn load_script(document: &Document, src: &str) -> Result<(), GraphError> {
	let script = document
		.create_element("script")
		.map_err(|e| GraphError::Render(js_message(&e)))?;
	let _ = script.set_attribute("src", src);
	let loaded = js_sys::Promise::new(&mut |resolve, reject| {
		let _ = script.add_event_listener_with_callback("load", &resolve);
		let _ = script.add_event_listener_with_callback("error", &reject);
	});
	let head = document
		.head()
		.ok_or_else(|| GraphError::Render("document has no head".into()))?;
	head.append_child(&script)
		.map_err(|e| GraphError::Render(js_message(&e)))?;
	JsFuture::from(loaded)
		.await
		.map_err(|_| GraphError::Render(format!("failed to load script {src}")))?;
	Ok(())
}

fn mermaid_loaded() -> bool {
	js_sys::Reflect::has(&js_sys::global(), &"mermaid".into()).unwrap_or(false)
}

async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let window: Window =
		web_sys::window().ok_or_else(|| GraphError::Fetch("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| GraphError::Fetch(js_message(&e)))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| GraphError::Fetch("fetch returned a non-Response value".into()))?;
	if !response.ok() {
		return Err(GraphError::Fetch(format!(
			"HTTP {} {}",
			response.status(),
			response.status_text()
		)));
	}
	let body = response
		.text()
		.map_err(|e| GraphError::Fetch(js_message(&e)))?;
	let text = JsFuture::from(body)
		.await
		.map_err(|e| GraphError::Fetch(js_message(&e)))?;
	text.as_string()
		.ok_or_else(|| GraphError::Fetch("response body is not text".into()))
}

/// `setTimeout`-backed [`Scheduler`]. Keeps each timer's handle and closure
/// alive until the set is cancelled; clearing an already-fired handle is a
/// no-op in the browser, so fired entries are safe to leave until then.
struct TimeoutScheduler {
	window: Window,
	pending: Vec<(i32, Closure<dyn FnMut()>)>,
}

impl TimeoutScheduler {
	fn new(window: Window) -> Self {
		Self {
			window,
			pending: Vec::new(),
		}
	}
}

impl Scheduler for TimeoutScheduler {
	fn schedule(&mut self, delay_ms: u32, op: Box<dyn FnOnce()>) {
		let mut op = Some(op);
		let cb = Closure::new(move || {
			if let Some(op) = op.take() {
				op();
			}
		});
		if let Ok(id) = self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_ms as i32,
			) {
			self.pending.push((id, cb));
		}
	}

	fn cancel_pending(&mut self) {
		for (id, _cb) in self.pending.drain(..) {
			self.window.clear_timeout_with_handle(id);
		}
	}
}

/// A rendered edge path plus its decoded endpoints.
#[derive(Clone)]
struct DomEdge {
	from: String,
	to: String,
	element: SvgElement,
}

impl RenderedEdge for DomEdge {
	fn from_id(&self) -> &str {
		&self.from
	}
	fn to_id(&self) -> &str {
		&self.to
	}
}

impl EdgeVisual for DomEdge {
	fn set_emphasis(&self, on: bool) {
		let (stroke, width) = if on {
			(HIGHLIGHT_STROKE, HIGHLIGHT_WIDTH)
		} else {
			(DEFAULT_STROKE, DEFAULT_WIDTH)
		};
		let style = self.element.style();
		let _ = style.set_property("stroke", stroke);
		let _ = style.set_property("stroke-width", width);
	}
}

/// Edge paths whose id carries the positional `(from, to)` encoding; other
/// paths (arrowheads, node borders) parse to `None` and are skipped.
fn collect_edges(target: &Element) -> Vec<DomEdge> {
	let mut edges = Vec::new();
	let Ok(paths) = target.query_selector_all("path") else {
		return edges;
	};
	for i in 0..paths.length() {
		let Some(node) = paths.item(i) else { continue };
		let Ok(el) = node.dyn_into::<SvgElement>() else {
			continue;
		};
		let id = el.id();
		if let Some((from, to)) = parse_edge_id(&id) {
			edges.push(DomEdge {
				from: from.to_owned(),
				to: to.to_owned(),
				element: el.clone(),
			});
		}
	}
	edges
}

type DomController = Rc<RefCell<InteractionController<DomEdge, TimeoutScheduler>>>;

fn wire_hover(target: &Element, controller: DomController) {
	let Ok(nodes) = target.query_selector_all(".node") else {
		return;
	};
	for i in 0..nodes.length() {
		let Some(node) = nodes.item(i) else { continue };
		let Ok(el) = node.dyn_into::<Element>() else {
			continue;
		};
		// Rendered node ids look like `flowchart-<nodeId>-<n>`.
		let Some(node_id) = el.id().split('-').nth(1).map(str::to_owned) else {
			continue;
		};

		let enter = {
			let (controller, node_id) = (controller.clone(), node_id.clone());
			Closure::<dyn FnMut()>::new(move || controller.borrow_mut().hover_enter(&node_id))
		};
		let _ = el.add_event_listener_with_callback("mouseenter", enter.as_ref().unchecked_ref());
		enter.forget();

		let leave = {
			let (controller, node_id) = (controller.clone(), node_id);
			Closure::<dyn FnMut()>::new(move || controller.borrow_mut().hover_leave(&node_id))
		};
		let _ = el.add_event_listener_with_callback("mouseleave", leave.as_ref().unchecked_ref());
		leave.forget();
	}
}

#[derive(Clone, Copy, Debug)]
struct ViewTransform {
	x: f64,
	y: f64,
	k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct PanState {
	active: bool,
	start_x: f64,
	start_y: f64,
	origin_x: f64,
	origin_y: f64,
}

/// Wraps the rendered markup's children in a root group and drives its
/// `transform` attribute: wheel zooms toward the cursor with a clamped
/// scale, background drag pans.
fn install_pan_zoom(svg: &Element) -> Result<(), GraphError> {
	svg.set_inner_html(&format!("<g>{}</g>", svg.inner_html()));
	let inner = svg
		.first_element_child()
		.ok_or_else(|| GraphError::Render("rendered markup is empty".into()))?;

	let transform = Rc::new(RefCell::new(ViewTransform::default()));
	let pan = Rc::new(RefCell::new(PanState::default()));

	// Captures are all Clone, so each handler gets its own copy.
	let retransform = {
		let (inner, transform) = (inner.clone(), transform.clone());
		move || {
			let t = transform.borrow();
			let _ = inner.set_attribute(
				"transform",
				&format!("translate({},{}) scale({})", t.x, t.y, t.k),
			);
		}
	};

	{
		let (svg_el, transform, retransform) = (svg.clone(), transform.clone(), retransform.clone());
		let on_wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |ev: WheelEvent| {
			ev.prevent_default();
			let rect = svg_el.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			{
				let mut t = transform.borrow_mut();
				let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
				let new_k = (t.k * factor).clamp(0.1, 10.0);
				let ratio = new_k / t.k;
				t.x = x - (x - t.x) * ratio;
				t.y = y - (y - t.y) * ratio;
				t.k = new_k;
			}
			retransform();
		});
		let _ = svg.add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref());
		on_wheel.forget();
	}

	{
		let (svg_el, transform, pan) = (svg.clone(), transform.clone(), pan.clone());
		let on_mousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let rect = svg_el.get_bounding_client_rect();
			let t = transform.borrow();
			*pan.borrow_mut() = PanState {
				active: true,
				start_x: ev.client_x() as f64 - rect.left(),
				start_y: ev.client_y() as f64 - rect.top(),
				origin_x: t.x,
				origin_y: t.y,
			};
		});
		let _ =
			svg.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref());
		on_mousedown.forget();
	}

	{
		let (svg_el, transform, pan, retransform) = (
			svg.clone(),
			transform.clone(),
			pan.clone(),
			retransform.clone(),
		);
		let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let p = *pan.borrow();
			if !p.active {
				return;
			}
			let rect = svg_el.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			{
				let mut t = transform.borrow_mut();
				t.x = p.origin_x + (x - p.start_x);
				t.y = p.origin_y + (y - p.start_y);
			}
			retransform();
		});
		let _ =
			svg.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
		on_mousemove.forget();
	}

	for event in ["mouseup", "mouseleave"] {
		let pan = pan.clone();
		let on_release = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
			pan.borrow_mut().active = false;
		});
		let _ = svg.add_event_listener_with_callback(event, on_release.as_ref().unchecked_ref());
		on_release.forget();
	}

	Ok(())
}

fn set_body_background(document: &Document) {
	if let Some(body) = document.body() {
		let _ = body.style().set_property("background-color", "#121212");
	}
}

/// Fetches the integration graph from `url`, renders it into the element
/// with id `target_id`, and wires pan/zoom plus hover highlighting.
/// Fails silently: every error is logged to the console and the render
/// attempt aborts; nothing is shown in-page.
pub async fn render_integration_graph(url: &str, target_id: &str) {
	if let Err(err) = try_render(url, target_id).await {
		error!("integration graph render aborted: {err}");
	}
}

async fn try_render(url: &str, target_id: &str) -> Result<(), GraphError> {
	let window: Window =
		web_sys::window().ok_or_else(|| GraphError::Render("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| GraphError::Render("no document".into()))?;
	let target = document
		.get_element_by_id(target_id)
		.ok_or_else(|| GraphError::TargetNotFound(target_id.to_owned()))?;

	if !mermaid_loaded() {
		load_script(&document, MERMAID_CDN).await?;
	}
	let renderer = MermaidRenderer;
	renderer.configure_theme(&ThemeOptions::default());
	set_body_background(&document);

	let text = fetch_text(url).await?;
	let model = GraphModel::from_json(&text)?;
	let markup = renderer.render_diagram(&diagram::flowchart_text(&model)?).await?;
	target.set_inner_html(&markup);

	let svg = target
		.query_selector("svg")
		.ok()
		.flatten()
		.ok_or_else(|| GraphError::Render("renderer produced no svg element".into()))?;
	install_pan_zoom(&svg)?;

	let edges = collect_edges(&target);
	info!(
		"integration graph rendered: {} links, {} drawn edges",
		model.links().len(),
		edges.len()
	);
	let controller = Rc::new(RefCell::new(InteractionController::new(
		edges,
		TimeoutScheduler::new(window),
	)));
	wire_hover(&target, controller);
	Ok(())
}

/// JS-callable wrapper mirroring the original browser API:
/// `renderIntegrationGraph(url, targetDivId)`.
#[wasm_bindgen(js_name = renderIntegrationGraph)]
pub fn render_integration_graph_js(url: String, target_id: String) {
	wasm_bindgen_futures::spawn_local(async move {
		render_integration_graph(&url, &target_id).await;
	});
}

/// Hosts the integration graph inside the app: renders the container div
/// and kicks off the fetch-render-wire pipeline once it is mounted.
#[component]
pub fn IntegrationGraph(
	/// URL the graph payload is fetched from.
	#[prop(into)]
	url: String,
	/// DOM id given to the container div.
	#[prop(default = "integration-graph".to_string(), into)]
	container_id: String,
) -> impl IntoView {
	let div_ref = NodeRef::<leptos::html::Div>::new();

	{
		let (url, container_id) = (url, container_id.clone());
		Effect::new(move |_| {
			if div_ref.get().is_none() {
				return;
			}
			let (url, container_id) = (url.clone(), container_id.clone());
			wasm_bindgen_futures::spawn_local(async move {
				render_integration_graph(&url, &container_id).await;
			});
		});
	}

	view! { <div node_ref=div_ref id=container_id class="integration-graph"></div> }
}
