//! Dashboard views walkthrough
//!
//! This example demonstrates:
//! - Loading the dashboard configuration (optional YAML path argument)
//! - Loading the sample records through simulated slow sources
//! - Driving the bookings, complaints and guests views with user events
//! - Facet counts for the complaints and guests summary cards
//!
//! Run with `RUST_LOG=kapulaga=debug` to see every pipeline stage.

use kapulaga::prelude::*;
use tracing_subscriber::EnvFilter;

fn print_page<R: Record>(
    title: &str,
    page: &PaginatedResponse<R>,
    describe: impl Fn(&R) -> String,
) {
    println!("{title}");
    if page.is_empty() {
        println!("   (no records found)\n");
        return;
    }
    for record in &page.data {
        println!("   {}", describe(record));
    }
    println!(
        "   Showing {} to {} of {} (page {}/{})\n",
        page.pagination.first_item,
        page.pagination.last_item,
        page.pagination.total,
        page.pagination.page,
        page.pagination.total_pages
    );
}

fn describe_reservation(r: &Reservation) -> String {
    format!(
        "{} {:<18} {:>12} {:<12} room {}",
        r.reservation_number,
        r.guest_name,
        r.total_amount,
        r.status.label(),
        r.room_number().unwrap_or("-")
    )
}

fn describe_complaint(c: &Complaint) -> String {
    format!(
        "{} [{}/{}] {}",
        c.complaint_number,
        c.priority.label(),
        c.status.label(),
        c.subject
    )
}

fn describe_guest(g: &Guest) -> String {
    format!(
        "{:<16} {:<15} tier {:<9} spent {}{}",
        g.full_name,
        g.nationality,
        g.tier().map(|t| t.label()).unwrap_or("-"),
        g.total_spent,
        if g.vip_status { " (VIP)" } else { "" }
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kapulaga=info")),
        )
        .init();

    println!("🏨 Kapulaga Dashboard Views");
    println!("===========================\n");

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::from_yaml_file(&path)?,
        None => DashboardConfig::default_config(),
    };
    println!(
        "✅ Configuration: page sizes {}/{}/{}, load delay {:?}\n",
        config.bookings.page_size,
        config.complaints.page_size,
        config.guests.page_size,
        config.load_delay()
    );

    // Load the three stores concurrently, as the pages would on mount
    let delay = config.load_delay();
    let reservations = InMemoryRecordSource::reservations()?.with_latency(delay);
    let complaints = InMemoryRecordSource::complaints()?.with_latency(delay);
    let guests = InMemoryRecordSource::guests()?.with_latency(delay);

    let (reservations, complaints, guests) = tokio::join!(
        RecordStore::<Reservation>::load(&reservations),
        RecordStore::<Complaint>::load(&complaints),
        RecordStore::<Guest>::load(&guests),
    );

    // === Bookings ===
    let mut bookings = DashboardView::mount(reservations, &config.bookings)?;
    print_page("📅 Bookings, most recent first", bookings.current(), describe_reservation);

    let page = bookings.dispatch(ViewEvent::NextPage);
    print_page("📅 Bookings, next page", page, describe_reservation);

    let page = bookings.dispatch(ViewEvent::SortRequested(ReservationField::TotalAmount));
    print_page("📅 Bookings by amount", page, describe_reservation);

    let page = bookings.dispatch(ViewEvent::SortRequested(ReservationField::TotalAmount));
    print_page("📅 Bookings by amount, descending", page, describe_reservation);

    let pending = Predicate::parse_equals(ReservationField::Status, "PENDING")?;
    let page = bookings.dispatch(ViewEvent::FilterSet(pending));
    print_page("📅 Pending bookings", page, describe_reservation);

    // === Complaints ===
    let mut complaints_view = DashboardView::mount(complaints, &config.complaints)?;
    let by_status = facet_counts(complaints_view.store().records(), ComplaintField::Status);
    println!("📋 Complaints by status: {:?}", by_status);
    let urgent = Predicate::parse_equals(ComplaintField::Priority, "urgent")?;
    println!(
        "📋 Urgent complaints: {}\n",
        count_matching(complaints_view.store().records(), &urgent)
    );

    let page = complaints_view.dispatch(ViewEvent::SearchChanged("room".to_string()));
    print_page("📋 Complaints mentioning \"room\"", page, describe_complaint);

    let page = complaints_view.dispatch(ViewEvent::FilterSet(urgent));
    print_page("📋 ... that are urgent", page, describe_complaint);

    // === Guests ===
    let mut guests_view = DashboardView::mount(guests, &config.guests)?;
    guests_view.dispatch(ViewEvent::ModeChanged(ViewMode::Cards));
    print_page("👤 Guests", guests_view.current(), describe_guest);

    let vip = Predicate::equals(GuestField::VipStatus, true)?;
    let page = guests_view.dispatch(ViewEvent::FilterSet(vip));
    print_page("👤 VIP guests", page, describe_guest);

    guests_view.dispatch(ViewEvent::FiltersReset);
    let big_spenders = Predicate::parse_range(GuestField::TotalSpent, Some("15000000"), None)?;
    let page = guests_view.dispatch(ViewEvent::FilterSet(big_spenders));
    print_page("👤 Guests who spent at least 15,000,000", page, describe_guest);

    // === Query parameters ===
    let params: QueryParams = serde_json::from_str(
        r#"{"limit": 5, "filter": "{\"booking_source\": \"OTA\"}", "sort": "check_in_date"}"#,
    )?;
    let state = ViewState::from_params::<Reservation>(&params, &config.bookings)?;
    let page = state.project(bookings.store().records());
    print_page(
        "🔗 ?filter={\"booking_source\":\"OTA\"}&sort=check_in_date&limit=5",
        &page,
        describe_reservation,
    );

    println!("📦 As JSON: {}", serde_json::to_string(&page.pagination)?);

    Ok(())
}
