mod collapsed;
