//! HTML templates for DevMeet transactional emails

use chrono::{DateTime, Utc};
use reqwest::Url;

/// Dashboard link used in the welcome email
const DASHBOARD_URL: &str = "https://devmeet.app/events";

/// Google Calendar event creation endpoint
const GOOGLE_CALENDAR_RENDER_URL: &str = "https://www.google.com/calendar/render";

/// Event fields rendered into the application confirmation email
#[derive(Debug, Clone, Copy)]
pub struct EventDetails<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub organisation: &'a str,
    pub venue: &'a str,
    pub city: &'a str,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Welcome email sent after a successful signup
pub fn welcome_email(username: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Welcome to DevMeet</title>
</head>
<body style="font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f4f4f4; margin: 0; padding: 0;">
    <div style="max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
        <div style="background-color: #4A90E2; color: #ffffff; padding: 20px; text-align: center;">
            <h1 style="margin: 0; font-size: 24px;">Welcome to DevMeet!</h1>
        </div>
        <div style="padding: 30px;">
            <h2 style="color: #4A90E2; margin-top: 0;">Hi {username},</h2>
            <p>We are thrilled to have you on board! Your account has been successfully created.</p>
            <p>At DevMeet, we strive to bring you the best events and hackathons. Explore the platform and start your journey.</p>
            <a href="{DASHBOARD_URL}" style="display: inline-block; padding: 12px 24px; background-color: #4A90E2; color: #ffffff; text-decoration: none; border-radius: 4px; font-weight: bold; margin-top: 20px;">Go to Dashboard</a>
            <p style="margin-top: 30px; font-size: 0.9em; color: #666;">If you have any questions, feel free to reply to this email.</p>
        </div>
        <div style="background-color: #333; color: #fff; text-align: center; padding: 15px; font-size: 12px;">
            <p>You received this email because you signed up on DevMeet.</p>
        </div>
    </div>
</body>
</html>"#
    )
}

/// Password reset email carrying the one-time code
pub fn password_reset_otp_email(username: &str, otp: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Password Reset Request</title>
</head>
<body style="font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f4f4f4; margin: 0; padding: 0;">
    <div style="max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
        <div style="background-color: #6C5CE7; color: #ffffff; padding: 20px; text-align: center;">
            <h1 style="margin: 0; font-size: 24px;">Password Reset Request</h1>
        </div>
        <div style="padding: 30px; text-align: center;">
            <h2>Hello {username},</h2>
            <p>You requested to reset your password. Use the OTP below to proceed.</p>
            <div style="display: inline-block; padding: 15px 30px; background-color: #f0f0f0; color: #333; font-size: 32px; font-weight: bold; letter-spacing: 5px; border-radius: 8px; margin: 20px 0; border: 2px dashed #6C5CE7;">{otp}</div>
            <p>This OTP is valid for 10 minutes. If you did not request this, please ignore this email.</p>
        </div>
        <div style="background-color: #333; color: #fff; text-align: center; padding: 15px; font-size: 12px;">
            <p>DevMeet</p>
        </div>
    </div>
</body>
</html>"#
    )
}

/// Confirmation email sent after a successful event application
pub fn application_confirmed_email(username: &str, event: &EventDetails) -> String {
    let calendar_url = google_calendar_url(event);
    let start = event.start_date.format("%B %-d, %Y");
    let end = event.end_date.format("%B %-d, %Y");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Application Successful</title>
</head>
<body style="font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f4f4f4; margin: 0; padding: 0;">
    <div style="max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 8px; overflow: hidden;">
        <div style="background-color: #8E44AD; color: #ffffff; padding: 20px; text-align: center;">
            <h1 style="margin: 0; font-size: 24px;">Application Successful!</h1>
        </div>
        <div style="padding: 30px;">
            <h2 style="color: #8E44AD; margin-top: 0;">Hello {username},</h2>
            <p>You have successfully applied for <strong>{title}</strong>.</p>
            <div style="background-color: #f3e5f5; border-radius: 8px; padding: 20px; margin: 20px 0; border: 1px solid #e1bee7;">
                <h3 style="margin-top: 0; color: #4a148c;">{title}</h3>
                <div style="margin-bottom: 10px; font-size: 14px;"><strong>Date:</strong> {start} - {end}</div>
                <div style="margin-bottom: 10px; font-size: 14px;"><strong>Venue:</strong> {venue}, {city}</div>
                <div style="font-size: 14px;"><strong>Organisation:</strong> {organisation}</div>
            </div>
            <p>Don't miss out! Add this event to your calendar now.</p>
            <center>
                <a href="{calendar_url}" target="_blank" style="display: inline-block; padding: 12px 24px; background-color: #8E44AD; color: #ffffff; text-decoration: none; border-radius: 4px; font-weight: bold; margin-top: 20px;">Add to Google Calendar</a>
            </center>
            <p style="margin-top: 30px;">Good luck with the event! We'll keep you posted on any updates.</p>
        </div>
        <div style="background-color: #333; color: #fff; text-align: center; padding: 15px; font-size: 12px;">
            <p>DevMeet</p>
        </div>
    </div>
</body>
</html>"#,
        title = event.title,
        venue = event.venue,
        city = event.city,
        organisation = event.organisation,
    )
}

/// Build a Google Calendar "add event" link for an event
fn google_calendar_url(event: &EventDetails) -> String {
    // Google Calendar expects compact UTC timestamps (YYYYMMDDTHHMMSSZ)
    let dates = format!(
        "{}/{}",
        event.start_date.format("%Y%m%dT%H%M%SZ"),
        event.end_date.format("%Y%m%dT%H%M%SZ")
    );
    let location = format!("{}, {}", event.venue, event.city);

    Url::parse_with_params(
        GOOGLE_CALENDAR_RENDER_URL,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title),
            ("dates", dates.as_str()),
            ("details", event.description),
            ("location", location.as_str()),
        ],
    )
    .map(|url| url.to_string())
    .unwrap_or_else(|_| GOOGLE_CALENDAR_RENDER_URL.to_string())
}
