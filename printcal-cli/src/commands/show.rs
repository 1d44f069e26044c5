use anyhow::Result;

use printcal_core::filter::FilterBucket;
use printcal_core::month::ViewMonth;
use printcal_core::view::CalendarView;

use crate::client::Client;
use crate::config::GlobalConfig;
use crate::render;

pub async fn run(config: &GlobalConfig, month: ViewMonth, hide: &[String]) -> Result<()> {
    let site = config.require_site()?;
    let client = Client::new(site, config.rest_nonce.clone());

    let mut view = CalendarView::new(month);
    view.set_font_size(config.font_size);
    for bucket in hide {
        view.hide_filter(FilterBucket::parse(bucket));
    }

    let spinner = render::create_spinner(format!("Fetching {month}"));
    let generation = view.begin_fetch();
    let result = client.fetch_calendar().await;
    spinner.finish_and_clear();

    view.complete_fetch(generation, result?);

    println!("{}", render::render_grid(&view.populated_grid()));
    Ok(())
}
