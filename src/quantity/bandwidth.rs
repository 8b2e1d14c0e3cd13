quantity!(Gigabytes, "GB");
