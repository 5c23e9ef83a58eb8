mod status_reports_every_section;
