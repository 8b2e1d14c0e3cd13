quantity!(Kxt, "KXT");
