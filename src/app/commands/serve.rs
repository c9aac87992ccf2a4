use log::*;

use std::convert::TryInto;
use std::thread;
use futures::executor;

use crossbeam_channel::{
  bounded, Sender, Receiver,
};

use actix_cors::Cors;
use actix_rt::System;
use actix_web::{get, web, middleware, HttpResponse, App, HttpServer};

use crate::{
  error::*,
  app::*,
  db::DbService,
  services::config_services,
};

#[derive(Debug)]
enum StopEvent {
  Shutdown,
}

/// Handle for requesting a graceful stop and waiting until it happens.
#[derive(Clone)]
struct Stopper {
  tx: Sender<StopEvent>,
  rx: Receiver<StopEvent>,
}

impl Stopper {
  fn new() -> Self {
    let (tx, rx) = bounded(1);
    Self { tx, rx }
  }

  fn shutdown(&self) {
    // A full channel means a shutdown is already pending.
    let _ = self.tx.try_send(StopEvent::Shutdown);
  }

  fn wait_shutdown(&self) -> Result<StopEvent> {
    Ok(self.rx.recv()?)
  }
}

/// Config-gated endpoint for stopping the server remotely.
#[get("/stop")]
async fn stop_server(stopper: web::Data<Stopper>) -> HttpResponse {
  info!("Got shutdown request.");
  stopper.shutdown();

  HttpResponse::Ok().body("Shutting down.")
}

pub fn execute(config: AppConfig) -> Result<()> {
  run_server(&config, "api")
}

async fn test_db(url: String) -> Result<()> {
  let db = DbService::new(&url)?;
  db.prepare().await
}

fn run_server(config: &AppConfig, prefix: &str) -> Result<()> {
  let mut sys = System::new(format!("system.{}", prefix));

  let debug = config.get_bool("debug")?.unwrap_or(false);
  debug!("Debug = {:?}", debug);

  if debug {
    let db_url = config.get_str("db.url")?.expect("db.url must be set");

    // Exercise every prepared statement before accepting requests.
    sys.block_on(test_db(db_url))?;
  }

  // configure services
  info!("Serve.Services: configure services. prefix={}", prefix);
  let services = config_services(&config, prefix)?;

  // Check if the stop endpoint is enabled for this server
  let stopper = if config.get_bool(&format!("{}.stopper", prefix))?.unwrap_or_default() {
    Some(Stopper::new())
  } else {
    None
  };

  // Start http server
  let handler_stopper = stopper.clone();
  let mut server = HttpServer::new(move || {
    let mut app = App::new()
      .wrap(middleware::Compress::default())
      .wrap(Cors::permissive())
      .configure(|web| services.web_config(web));

    if let Some(ref stopper) = handler_stopper {
      app = app.data(stopper.clone())
        .service(stop_server);
    }

    app
  });

  // workers
  let workers = match config.get_int(&format!("{}.workers", prefix))? {
    Some(workers) => workers.try_into().expect("Workers must be > 0"),
    None => num_cpus::get(),
  };
  info!("Workers: {}", workers);
  server = server.workers(workers);

  // listen backlog
  if let Some(backlog) = config.get_int(&format!("{}.backlog", prefix))? {
    info!("Listen backlog: {}", backlog);
    server = server.backlog(backlog as i32);
  }

  // setup binds.
  let listen = config.get_str(&format!("{}.listen", prefix))?
    .expect(&format!("Missing {}.listen", prefix));
  info!("{} services listening on: {}", prefix, listen);
  server = server.bind(listen)?;

  // start server
  let server = server.run();

  if let Some(stopper) = stopper {
    let srv = server.clone();
    thread::spawn(move || {
      debug!("Wait for shutdown signal");
      match stopper.wait_shutdown() {
        Ok(StopEvent::Shutdown) => {
          info!("Got shutdown signal.  Stop server.");
          executor::block_on(srv.stop(true));
        },
        Err(_) => (),
      }
    });
  }

  // run server future
  Ok(sys.block_on(server)?)
}
