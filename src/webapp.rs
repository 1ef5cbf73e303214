use maud::{html, Markup, PreEscaped, Render, DOCTYPE};
use tide::{
    http::{Mime, StatusCode},
    sse, Request, Response,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use aged::*;
use crate::prelude::*;
use crate::util::format_datetime;

// the styling hook for each bucket class, as the page ships it
const AGE_CSS: &str = "\
span.age-mins { color: #080; }\n\
span.age-hours { color: #080; }\n\
span.age-days { color: #040; }\n\
span.age-weeks { color: #444; }\n\
span.age-months { color: #888; }\n\
span.age-years { color: #bbb; }\n";

#[derive(Clone)]
pub struct WebState {
    cmd_tx: Sender<AppCommand>,
    entry_list: Arc<RwLock<EntryList>>,
    event_rx: broadcast::InactiveReceiver<AppEvent>,
    tz: tz::TimeZone,
}

impl WebState {
    pub fn new(
        cmd_tx: Sender<AppCommand>,
        entry_list: Arc<RwLock<EntryList>>,
        event_rx: broadcast::InactiveReceiver<AppEvent>,
        tz: tz::TimeZone,
    ) -> Self {
        Self {
            cmd_tx,
            entry_list,
            event_rx,
            tz,
        }
    }
    fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_rx.activate_cloned()
    }
}

pub async fn server(state: WebState, port: u16) {
    info!("Starting web server");
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let mut app = tide::with_state(state);
    app.at("/").get(main_page).post(main_page_post);
    app.at("/sse")
        .get(sse::endpoint(|r, s| sse_handler(r, s)));
    app.listen(addr).await;
}

async fn sse_handler(state: Request<WebState>, sender: sse::Sender) -> tide::Result<()> {
    let mut chan = state.state().subscribe();
    while let Some(ev) = chan.next().await {
        match ev {
            AppEvent::LabelsChanged | AppEvent::EntryListUpdate => {
                let partial = {
                    let x = state.state().entry_list.read().unwrap();
                    entries_partial(&x, state.state().tz.as_ref()).into_string()
                };
                sender.send("entries", &partial, None).await?;
            }
        }
    }
    Ok(())
}

async fn main_page_post(mut req: Request<WebState>) -> tide::Result<Response> {
    if let Ok(x) = req.body_string().await {
        if let Ok(cmd) = serde_json::from_str::<AppCommand>(&x) {
            trace!("Command received via POST: {cmd:?}");
            req.state().cmd_tx.send(cmd).await;
        } else {
            error!("Bad command received via POST");
        }
    }
    Ok(Response::new(200))
}

async fn main_page(state: Request<WebState>) -> tide::Result<Response> {
    let script = maud::PreEscaped(
        r#"
            let eventSource = new EventSource("sse");
            eventSource.addEventListener("entries", (event) => {
                document.getElementById("entries").innerHTML = event.data;
            });
    "#,
    );

    let tzref = state.state().tz.as_ref();
    let now = UnixMoment::now();
    let current_time = now
        .as_datetime(tzref)
        .map(format_datetime)
        .unwrap_or(String::from("unknown"));
    let ep = {
        let x = state.state().entry_list.read().unwrap();
        entries_partial(&x, tzref)
    };

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                title { "aged" }
                style { (PreEscaped(AGE_CSS)) }
            }
            body {
                p { strong { (current_time) } }
                div #entries { (ep) }
                script { (script) }
            }
        }
    };
    let body = markup.render().into_string();
    let mime = Mime::from_str("text/html;charset=utf-8").unwrap();
    let mut resp = Response::new(StatusCode::Ok);
    resp.set_body(body);
    resp.set_content_type(mime);
    Ok(resp)
}

fn entries_partial(list: &EntryList, tzref: tz::TimeZoneRef) -> Markup {
    html! {
        ul {
            @for e in list.entries() {
                @let title = e.stamp.as_datetime(tzref).map(format_datetime).unwrap_or_default();
                li {
                    (e.name) " "
                    span class=(e.class()) title=(title) data-ut=(e.stamp.seconds()) { (e.label) }
                }
            }
        }
    }
    .render()
}
